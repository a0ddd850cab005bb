use super::scoring::ScoreLevel;
use super::use_case::{LegacyLevel, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeCategory {
    #[serde(rename = "Operational Efficiency")]
    OperationalEfficiency,
    #[serde(rename = "Customer Insights")]
    CustomerInsights,
    #[serde(rename = "Risk & Compliance")]
    RiskCompliance,
    #[serde(rename = "Automation & AI")]
    AutomationAi,
    Other,
}

impl ChallengeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OperationalEfficiency => "Operational Efficiency",
            Self::CustomerInsights => "Customer Insights",
            Self::RiskCompliance => "Risk & Compliance",
            Self::AutomationAi => "Automation & AI",
            Self::Other => "Other",
        }
    }
}

/// Fixed three-axis rating; every axis is "higher is better".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeScores {
    pub impact: ScoreLevel,
    pub feasibility: ScoreLevel,
    pub priority: ScoreLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<ChallengeCategory>,
    #[serde(default)]
    pub impact: Option<LegacyLevel>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub scores: Option<ChallengeScores>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ChallengeDraft {
    pub title: String,
    pub category: Option<ChallengeCategory>,
    pub impact: Option<LegacyLevel>,
    pub scores: Option<ChallengeScores>,
    pub team_id: Option<String>,
}

impl Challenge {
    pub fn from_draft(id: String, draft: ChallengeDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title,
            category: draft.category,
            impact: draft.impact,
            status: Status::Backlog,
            scores: draft.scores,
            selected: false,
            team_id: draft.team_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Minimum score on each axis for a challenge to be auto-selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionThresholds {
    pub impact: ScoreLevel,
    pub feasibility: ScoreLevel,
    pub priority: ScoreLevel,
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            impact: ScoreLevel::MID,
            feasibility: ScoreLevel::MID,
            priority: ScoreLevel::MID,
        }
    }
}
