use super::roadmap::{Placement, RoleAllocation};
use super::scoring::{Score, ScoreMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Backlog,
    InProgress,
    Completed,
    Archived,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

/// Coarse three-step rating kept for older records and challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scores: ScoreMap,
    /// Composite score; always derived from `scores` and the parameter registry.
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub business_objective: String,
    #[serde(default)]
    pub expected_outcome: String,
    #[serde(default)]
    pub success_criteria: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub estimated_resources: String,
    #[serde(default)]
    pub estimated_time_in_weeks: Option<f64>,
    #[serde(default)]
    pub estimated_fte: Option<f64>,
    #[serde(default)]
    pub role_allocations: Vec<RoleAllocation>,
    #[serde(default)]
    pub in_roadmap: bool,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub roadmap_order: Option<u32>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Form input for a new use case; scores left out are filled from parameter defaults.
#[derive(Debug, Clone, Default)]
pub struct UseCaseDraft {
    pub title: String,
    pub description: String,
    pub scores: Option<ScoreMap>,
    pub status: Status,
    pub team: Vec<String>,
    pub technologies: Vec<String>,
    pub business_objective: String,
    pub expected_outcome: String,
    pub success_criteria: String,
    pub estimated_time: String,
    pub estimated_resources: String,
    pub team_id: Option<String>,
    pub project_id: Option<String>,
}

impl UseCase {
    pub fn from_draft(id: String, draft: UseCaseDraft, scores: ScoreMap, score: Score) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title,
            description: draft.description,
            scores,
            score,
            status: draft.status,
            team: draft.team,
            technologies: draft.technologies,
            business_objective: draft.business_objective,
            expected_outcome: draft.expected_outcome,
            success_criteria: draft.success_criteria,
            estimated_time: draft.estimated_time,
            estimated_resources: draft.estimated_resources,
            estimated_time_in_weeks: None,
            estimated_fte: None,
            role_allocations: Vec::new(),
            in_roadmap: false,
            placement: Placement::Unplaced,
            roadmap_order: None,
            team_id: draft.team_id,
            project_id: draft.project_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_record_loads_with_defaults() {
        let use_case: UseCase = serde_json::from_str(
            r#"{"id":"u1","title":"Churn model","scores":{"impact":5},"status":"in-progress"}"#,
        )
        .expect("sparse use case should parse");
        assert_eq!(use_case.status, Status::InProgress);
        assert_eq!(use_case.placement, Placement::Unplaced);
        assert!(!use_case.in_roadmap);
        assert!(use_case.role_allocations.is_empty());
    }

    #[test]
    fn timestamps_round_trip() {
        let use_case: UseCase = serde_json::from_str(
            r#"{"id":"u1","title":"t","created_at":"2024-03-01T10:00:00Z","updated_at":"2024-03-02T10:00:00Z"}"#,
        )
        .expect("use case should parse");
        let json = serde_json::to_string(&use_case).expect("use case should serialize");
        let back: UseCase = serde_json::from_str(&json).expect("use case should re-parse");
        assert_eq!(back.created_at, use_case.created_at);
        assert_eq!(back.updated_at.to_rfc3339(), "2024-03-02T10:00:00+00:00");
    }

    #[test]
    fn draft_carries_outcome_and_criteria() {
        let draft = UseCaseDraft {
            title: "Churn model".to_string(),
            expected_outcome: "Fewer cancellations".to_string(),
            success_criteria: "Churn below 5%".to_string(),
            ..UseCaseDraft::default()
        };
        let use_case = UseCase::from_draft("u1".to_string(), draft, ScoreMap::new(), 0.0);
        assert_eq!(use_case.expected_outcome, "Fewer cancellations");
        assert_eq!(use_case.success_criteria, "Churn below 5%");
    }
}
