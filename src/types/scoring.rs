use crate::error::PrioritizerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type Score = f64;

/// Raw per-parameter score on the 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ScoreLevel(u8);

impl ScoreLevel {
    pub const MIN: ScoreLevel = ScoreLevel(1);
    pub const MID: ScoreLevel = ScoreLevel(3);
    pub const MAX: ScoreLevel = ScoreLevel(5);

    pub fn new(value: u8) -> Result<Self, PrioritizerError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PrioritizerError::InvalidScore(format!(
                "{value} is outside the 1-5 range"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Mirror image on the 1..=5 scale (5 becomes 1, 4 becomes 2, ...).
    pub fn inverted(self) -> Self {
        Self(6 - self.0)
    }
}

impl Default for ScoreLevel {
    fn default() -> Self {
        Self::MID
    }
}

impl TryFrom<u8> for ScoreLevel {
    type Error = PrioritizerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScoreLevel> for u8 {
    fn from(level: ScoreLevel) -> Self {
        level.0
    }
}

impl FromStr for ScoreLevel {
    type Err = PrioritizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| PrioritizerError::InvalidScore(format!("not a score level: {s}")))?;
        Self::new(value)
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredDirection {
    #[default]
    High,
    Low,
    Neutral,
}

impl PreferredDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreParameter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weight: f64,
    #[serde(default)]
    pub default_value: Option<ScoreLevel>,
    #[serde(default)]
    pub preferred_direction: PreferredDirection,
}

impl ScoreParameter {
    pub fn new(id: &str, name: &str, description: &str, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            weight,
            default_value: Some(ScoreLevel::MID),
            preferred_direction: PreferredDirection::High,
        }
    }

    pub fn with_direction(mut self, direction: PreferredDirection) -> Self {
        self.preferred_direction = direction;
        self
    }

    /// Value used when a use case has no score for this parameter.
    pub fn fallback_score(&self) -> ScoreLevel {
        self.default_value.unwrap_or_default()
    }
}

/// Raw scores keyed by parameter id.
pub type ScoreMap = BTreeMap<String, ScoreLevel>;

/// Emphasis of a single raw score relative to its parameter's preferred direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Favorable: high on a "higher is better" parameter, low on a "lower is better" one.
    High,
    /// Unfavorable.
    Low,
}

pub fn default_parameters() -> Vec<ScoreParameter> {
    vec![
        ScoreParameter::new(
            "impact",
            "Impact",
            "How valuable is this use case for the business?",
            1.0,
        ),
        ScoreParameter::new(
            "easeOfImplementation",
            "Ease of Implementation",
            "How simple is it to develop and deploy?",
            0.8,
        ),
        ScoreParameter::new(
            "dataAvailability",
            "Data Availability",
            "Is the required data accessible, clean, and complete?",
            0.7,
        ),
        ScoreParameter::new(
            "businessValue",
            "Business Value",
            "What is the potential financial or strategic return?",
            0.9,
        ),
        ScoreParameter::new(
            "technicalFeasibility",
            "Technical Feasibility",
            "How challenging is the development from a technical standpoint?",
            0.8,
        ),
        ScoreParameter::new(
            "maintainability",
            "Maintainability",
            "Can this solution be easily maintained and scaled over time?",
            0.6,
        ),
        ScoreParameter::new(
            "ethicalConsiderations",
            "Ethical Considerations",
            "Are there any legal, privacy, or ethical concerns?",
            0.7,
        )
        .with_direction(PreferredDirection::Low),
    ]
}
