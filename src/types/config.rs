use crate::error::PrioritizerError;
use crate::types::challenge::SelectionThresholds;
use crate::types::roadmap::ViewMode;
use crate::types::scoring::{default_parameters, ScoreLevel, ScoreParameter};
use serde::Deserialize;
use std::collections::HashSet;

pub const DEFAULT_WORKSPACE_FILE: &str = ".prioritizer/workspace.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrioritizerConfig {
    pub project: Option<ProjectConfig>,
    pub workspace: Option<WorkspaceConfig>,
    pub roadmap: Option<RoadmapConfig>,
    pub challenges: Option<ChallengeConfig>,
    pub parameters: Option<Vec<ScoreParameter>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub id: Option<String>,
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapConfig {
    pub view: Option<ViewMode>,
    pub initial_selection: Option<u32>,
    pub fallback_weeks: Option<f64>,
    pub fallback_fte: Option<f64>,
    pub weeks_per_month: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeConfig {
    pub min_impact: Option<ScoreLevel>,
    pub min_feasibility: Option<ScoreLevel>,
    pub min_priority: Option<ScoreLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadmapSettings {
    pub view: ViewMode,
    pub initial_selection: usize,
    pub fallback_weeks: f64,
    pub fallback_fte: f64,
    pub weeks_per_month: f64,
}

impl Default for RoadmapSettings {
    fn default() -> Self {
        Self {
            view: ViewMode::Timeline,
            initial_selection: 5,
            fallback_weeks: 4.0,
            fallback_fte: 1.0,
            weeks_per_month: 4.0,
        }
    }
}

impl PrioritizerConfig {
    pub fn workspace_file(&self) -> &str {
        self.workspace
            .as_ref()
            .and_then(|workspace| workspace.file.as_deref())
            .unwrap_or(DEFAULT_WORKSPACE_FILE)
    }

    pub fn roadmap_settings(&self) -> RoadmapSettings {
        let defaults = RoadmapSettings::default();
        match &self.roadmap {
            Some(roadmap) => RoadmapSettings {
                view: roadmap.view.unwrap_or(defaults.view),
                initial_selection: roadmap
                    .initial_selection
                    .map_or(defaults.initial_selection, |value| value as usize),
                fallback_weeks: roadmap.fallback_weeks.unwrap_or(defaults.fallback_weeks),
                fallback_fte: roadmap.fallback_fte.unwrap_or(defaults.fallback_fte),
                weeks_per_month: roadmap.weeks_per_month.unwrap_or(defaults.weeks_per_month),
            },
            None => defaults,
        }
    }

    pub fn selection_thresholds(&self) -> SelectionThresholds {
        let defaults = SelectionThresholds::default();
        match &self.challenges {
            Some(challenges) => SelectionThresholds {
                impact: challenges.min_impact.unwrap_or(defaults.impact),
                feasibility: challenges.min_feasibility.unwrap_or(defaults.feasibility),
                priority: challenges.min_priority.unwrap_or(defaults.priority),
            },
            None => defaults,
        }
    }

    /// Parameter set a new workspace starts with.
    pub fn seed_parameters(&self) -> Vec<ScoreParameter> {
        self.parameters
            .clone()
            .filter(|parameters| !parameters.is_empty())
            .unwrap_or_else(default_parameters)
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().and_then(|project| project.id.as_deref())
    }

    pub fn team_id(&self) -> Option<&str> {
        self.project
            .as_ref()
            .and_then(|project| project.team_id.as_deref())
    }

    pub fn validate(&self) -> Result<(), PrioritizerError> {
        if self.workspace_file().trim().is_empty() {
            return Err(PrioritizerError::ConfigInvalid(
                "workspace.file cannot be empty".to_string(),
            ));
        }

        let settings = self.roadmap_settings();
        if settings.initial_selection == 0 {
            return Err(PrioritizerError::ConfigInvalid(
                "roadmap.initial_selection must be greater than 0".to_string(),
            ));
        }
        for (key, value) in [
            ("roadmap.fallback_weeks", settings.fallback_weeks),
            ("roadmap.fallback_fte", settings.fallback_fte),
            ("roadmap.weeks_per_month", settings.weeks_per_month),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PrioritizerError::ConfigInvalid(format!(
                    "{key} must be greater than 0"
                )));
            }
        }

        if let Some(parameters) = &self.parameters {
            validate_seed_parameters(parameters)?;
        }

        Ok(())
    }
}

fn validate_seed_parameters(parameters: &[ScoreParameter]) -> Result<(), PrioritizerError> {
    if parameters.is_empty() {
        return Err(PrioritizerError::ConfigInvalid(
            "parameters must contain at least one entry when present".to_string(),
        ));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for parameter in parameters {
        let id = parameter.id.trim();
        if id.is_empty() {
            return Err(PrioritizerError::ConfigInvalid(
                "parameters entries must have a non-empty id".to_string(),
            ));
        }
        if parameter.name.trim().is_empty() {
            return Err(PrioritizerError::ConfigInvalid(format!(
                "parameter '{id}' must have a non-empty name"
            )));
        }
        if !ids.insert(id.to_string()) {
            return Err(PrioritizerError::ConfigInvalid(format!(
                "parameters contains duplicate id: {id}"
            )));
        }
        if !names.insert(parameter.name.trim().to_lowercase()) {
            return Err(PrioritizerError::ConfigInvalid(format!(
                "parameters contains duplicate name: {}",
                parameter.name.trim()
            )));
        }
        if !parameter.weight.is_finite() || parameter.weight <= 0.0 {
            return Err(PrioritizerError::ConfigInvalid(format!(
                "parameter '{id}' weight must be greater than 0"
            )));
        }
    }
    Ok(())
}
