use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrioritizerError {
    #[error("parameter name cannot be empty")]
    EmptyParameterName,

    #[error("cannot delete parameter {0}: at least one scoring parameter is required")]
    LastParameter(String),

    #[error("invalid weight for parameter {0}: weight must be greater than 0")]
    InvalidWeight(String),

    #[error("use case title cannot be empty")]
    EmptyTitle,

    #[error("invalid score: {0}")]
    InvalidScore(String),

    #[error("invalid role allocation: {0}")]
    InvalidAllocation(String),

    #[error("invalid estimate: {0}")]
    InvalidEstimate(String),

    #[error("estimated FTE of {0} is derived from its role allocations; edit the roles instead")]
    FteLockedByRoles(String),

    #[error("phase {phase} does not belong to the {view} view")]
    PhaseNotInView { phase: String, view: String },

    #[error("use case is not on the roadmap: {0}")]
    NotInRoadmap(String),

    #[error("use case {id} is not in the {phase} phase")]
    NotInPhase { id: String, phase: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("use case not found: {0}")]
    UseCaseNotFound(String),

    #[error("challenge not found: {0}")]
    ChallengeNotFound(String),

    #[error("workspace not found: {0} (run `prioritizer init` first)")]
    WorkspaceNotFound(String),

    #[error("workspace already exists: {0} (use --force to overwrite)")]
    WorkspaceExists(String),

    #[error("workspace changed on disk since it was loaded: {0}")]
    StaleWorkspace(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrioritizerError {
    /// Rejections of user input that leave all state untouched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyParameterName
                | Self::LastParameter(_)
                | Self::InvalidWeight(_)
                | Self::EmptyTitle
                | Self::InvalidScore(_)
                | Self::InvalidAllocation(_)
                | Self::InvalidEstimate(_)
                | Self::FteLockedByRoles(_)
                | Self::PhaseNotInView { .. }
                | Self::NotInRoadmap(_)
                | Self::NotInPhase { .. }
                | Self::ConfigInvalid(_)
                | Self::ParameterNotFound(_)
                | Self::UseCaseNotFound(_)
                | Self::ChallengeNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PrioritizerError>;
