use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoadmapPhase {
    #[serde(rename = "short-term")]
    ShortTerm,
    #[serde(rename = "mid-term")]
    MidTerm,
    #[serde(rename = "long-term")]
    LongTerm,
    #[serde(rename = "quarterly-q1")]
    Q1,
    #[serde(rename = "quarterly-q2")]
    Q2,
    #[serde(rename = "quarterly-q3")]
    Q3,
    #[serde(rename = "quarterly-q4")]
    Q4,
}

impl RoadmapPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortTerm => "short-term",
            Self::MidTerm => "mid-term",
            Self::LongTerm => "long-term",
            Self::Q1 => "quarterly-q1",
            Self::Q2 => "quarterly-q2",
            Self::Q3 => "quarterly-q3",
            Self::Q4 => "quarterly-q4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "Short-Term (1-3 months)",
            Self::MidTerm => "Mid-Term (3-6 months)",
            Self::LongTerm => "Long-Term (6+ months)",
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    pub fn view(self) -> ViewMode {
        match self {
            Self::ShortTerm | Self::MidTerm | Self::LongTerm => ViewMode::Timeline,
            Self::Q1 | Self::Q2 | Self::Q3 | Self::Q4 => ViewMode::Quarterly,
        }
    }
}

impl fmt::Display for RoadmapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Timeline,
    Quarterly,
}

impl ViewMode {
    pub fn phases(self) -> &'static [RoadmapPhase] {
        match self {
            Self::Timeline => &[
                RoadmapPhase::ShortTerm,
                RoadmapPhase::MidTerm,
                RoadmapPhase::LongTerm,
            ],
            Self::Quarterly => &[
                RoadmapPhase::Q1,
                RoadmapPhase::Q2,
                RoadmapPhase::Q3,
                RoadmapPhase::Q4,
            ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::Quarterly => "quarterly",
        }
    }
}

/// Where a use case sits on the roadmap and who put it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "phase", rename_all = "snake_case")]
pub enum Placement {
    #[default]
    Unplaced,
    AutoAssigned(RoadmapPhase),
    ManuallyPlaced(RoadmapPhase),
}

impl Placement {
    pub fn phase(self) -> Option<RoadmapPhase> {
        match self {
            Self::Unplaced => None,
            Self::AutoAssigned(phase) | Self::ManuallyPlaced(phase) => Some(phase),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAllocation {
    pub role: String,
    pub fte: f64,
}

impl RoleAllocation {
    pub fn new(role: &str, fte: f64) -> Self {
        Self {
            role: role.to_string(),
            fte,
        }
    }
}

pub const DEFAULT_ROLES: [&str; 4] = [
    "Data Scientist",
    "Data Engineer",
    "Data Strategist",
    "Analytics Engineer",
];

/// Trims `role` and matches the casing of a default role when it names one.
pub fn canonical_role(role: &str) -> String {
    let role = role.trim();
    DEFAULT_ROLES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(role))
        .map_or_else(|| role.to_string(), |known| (*known).to_string())
}
