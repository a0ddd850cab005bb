use crate::query::SortKey;
use crate::types::challenge::ChallengeCategory;
use crate::types::roadmap::{RoadmapPhase, ViewMode};
use crate::types::scoring::{PreferredDirection, ScoreLevel};
use crate::types::use_case::{LegacyLevel, Status};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "prioritizer",
    version,
    about = "Weighted use-case prioritization and roadmap planning CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the workspace file and a starter prioritizer.toml
    Init(InitCommand),
    /// Ranked use-case list with per-parameter scores
    Rank(RankCommand),
    /// Manage scoring parameters
    Param(ParamCommand),
    /// Manage use cases
    Usecase(UseCaseCommand),
    /// Plan the roadmap
    Roadmap(RoadmapCommand),
    /// Manage business challenges
    Challenge(ChallengeCommand),
}

#[derive(Args)]
pub struct InitCommand {
    pub path: PathBuf,
    /// Replace an existing workspace
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct RankCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long)]
    pub team: Option<String>,
    /// Case-insensitive text search across titles, descriptions and tags
    #[arg(long)]
    pub search: Option<String>,
    /// score, title, created or param:<id>
    #[arg(long, default_value = "score", value_parser = parse_sort_key)]
    pub sort: SortKey,
    #[arg(long)]
    pub asc: bool,
}

#[derive(Args)]
pub struct ParamCommand {
    #[command(subcommand)]
    pub action: ParamAction,
}

#[derive(Subcommand)]
pub enum ParamAction {
    List {
        path: PathBuf,
    },
    Add {
        path: PathBuf,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0.5)]
        weight: f64,
        #[arg(long = "default", default_value = "3")]
        default_value: ScoreLevel,
        #[arg(long, value_enum, default_value = "high")]
        direction: DirectionArg,
    },
    Remove {
        path: PathBuf,
        id: String,
    },
    Move {
        path: PathBuf,
        id: String,
        #[arg(value_enum)]
        direction: MoveArg,
    },
    Edit {
        path: PathBuf,
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long = "default")]
        default_value: Option<ScoreLevel>,
        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,
    },
}

#[derive(Args)]
pub struct UseCaseCommand {
    #[command(subcommand)]
    pub action: UseCaseAction,
}

#[derive(Subcommand)]
pub enum UseCaseAction {
    Add(UseCaseAddArgs),
    /// Set one or more parameter scores
    Score {
        path: PathBuf,
        id: String,
        /// <parameter-id>=<1..5>, repeatable
        #[arg(long = "set", value_parser = parse_score_pair, required = true)]
        scores: Vec<(String, ScoreLevel)>,
    },
    Status {
        path: PathBuf,
        id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    Remove {
        path: PathBuf,
        id: String,
    },
    /// Existing use cases resembling a draft
    Similar {
        path: PathBuf,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        team: Vec<String>,
        #[arg(long = "tech")]
        technologies: Vec<String>,
    },
}

#[derive(Args)]
pub struct UseCaseAddArgs {
    pub path: PathBuf,
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// <parameter-id>=<1..5>, repeatable; unset parameters use their default
    #[arg(long = "score", value_parser = parse_score_pair)]
    pub scores: Vec<(String, ScoreLevel)>,
    #[arg(long, value_enum, default_value = "backlog")]
    pub status: StatusArg,
    #[arg(long)]
    pub team: Vec<String>,
    #[arg(long = "tech")]
    pub technologies: Vec<String>,
    #[arg(long, default_value = "")]
    pub objective: String,
    /// Expected business outcome
    #[arg(long, default_value = "")]
    pub outcome: String,
    /// How success will be measured
    #[arg(long, default_value = "")]
    pub criteria: String,
    /// Free-text time estimate, e.g. "3-6 months"
    #[arg(long, default_value = "")]
    pub time: String,
    /// Free-text resource estimate, e.g. "2 FTE"
    #[arg(long, default_value = "")]
    pub resources: String,
}

#[derive(Args)]
pub struct RoadmapCommand {
    /// Override the configured view
    #[arg(long, value_enum, global = true)]
    pub view: Option<ViewArg>,
    #[command(subcommand)]
    pub action: RoadmapAction,
}

#[derive(Subcommand)]
pub enum RoadmapAction {
    Show {
        path: PathBuf,
        #[arg(short, long, value_enum, default_value = "md")]
        format: ReportFormat,
    },
    Add {
        path: PathBuf,
        id: String,
    },
    Remove {
        path: PathBuf,
        id: String,
    },
    /// Place a use case in a phase of the active view
    Move {
        path: PathBuf,
        id: String,
        #[arg(value_enum)]
        phase: PhaseArg,
    },
    /// Order the given use cases first within a phase
    Reorder {
        path: PathBuf,
        #[arg(value_enum)]
        phase: PhaseArg,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    Estimate {
        path: PathBuf,
        id: String,
        #[arg(long, required_unless_present = "fte")]
        weeks: Option<f64>,
        #[arg(long, required_unless_present = "weeks")]
        fte: Option<f64>,
    },
    /// Replace role allocations; no --role clears them
    Roles {
        path: PathBuf,
        id: String,
        /// <role>=<fte>, repeatable
        #[arg(long = "role", value_parser = parse_role_pair)]
        roles: Vec<(String, f64)>,
    },
}

#[derive(Args)]
pub struct ChallengeCommand {
    #[command(subcommand)]
    pub action: ChallengeAction,
}

#[derive(Subcommand)]
pub enum ChallengeAction {
    Add {
        path: PathBuf,
        title: String,
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
        /// Coarse impact rating used when promoting
        #[arg(long, value_enum)]
        level: Option<LevelArg>,
        #[arg(long, requires = "feasibility", requires = "priority")]
        impact: Option<ScoreLevel>,
        #[arg(long, requires = "impact", requires = "priority")]
        feasibility: Option<ScoreLevel>,
        #[arg(long, requires = "impact", requires = "feasibility")]
        priority: Option<ScoreLevel>,
    },
    List {
        path: PathBuf,
    },
    /// Select every challenge meeting the configured thresholds
    AutoSelect {
        path: PathBuf,
    },
    /// Turn a challenge into a backlog use case
    Promote {
        path: PathBuf,
        id: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Backlog,
    InProgress,
    Completed,
    Archived,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Backlog => Status::Backlog,
            StatusArg::InProgress => Status::InProgress,
            StatusArg::Completed => Status::Completed,
            StatusArg::Archived => Status::Archived,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    High,
    Low,
    Neutral,
}

impl From<DirectionArg> for PreferredDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::High => PreferredDirection::High,
            DirectionArg::Low => PreferredDirection::Low,
            DirectionArg::Neutral => PreferredDirection::Neutral,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MoveArg {
    Up,
    Down,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewArg {
    Timeline,
    Quarterly,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Timeline => ViewMode::Timeline,
            ViewArg::Quarterly => ViewMode::Quarterly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PhaseArg {
    ShortTerm,
    MidTerm,
    LongTerm,
    Q1,
    Q2,
    Q3,
    Q4,
}

impl From<PhaseArg> for RoadmapPhase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::ShortTerm => RoadmapPhase::ShortTerm,
            PhaseArg::MidTerm => RoadmapPhase::MidTerm,
            PhaseArg::LongTerm => RoadmapPhase::LongTerm,
            PhaseArg::Q1 => RoadmapPhase::Q1,
            PhaseArg::Q2 => RoadmapPhase::Q2,
            PhaseArg::Q3 => RoadmapPhase::Q3,
            PhaseArg::Q4 => RoadmapPhase::Q4,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    OperationalEfficiency,
    CustomerInsights,
    RiskCompliance,
    AutomationAi,
    Other,
}

impl From<CategoryArg> for ChallengeCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::OperationalEfficiency => ChallengeCategory::OperationalEfficiency,
            CategoryArg::CustomerInsights => ChallengeCategory::CustomerInsights,
            CategoryArg::RiskCompliance => ChallengeCategory::RiskCompliance,
            CategoryArg::AutomationAi => ChallengeCategory::AutomationAi,
            CategoryArg::Other => ChallengeCategory::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LevelArg {
    Low,
    Medium,
    High,
}

impl From<LevelArg> for LegacyLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Low => LegacyLevel::Low,
            LevelArg::Medium => LegacyLevel::Medium,
            LevelArg::High => LegacyLevel::High,
        }
    }
}

fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected <name>=<value>, got `{raw}`"))
}

fn parse_score_pair(raw: &str) -> Result<(String, ScoreLevel), String> {
    let (id, value) = split_pair(raw)?;
    let level = value.parse::<ScoreLevel>().map_err(|e| e.to_string())?;
    Ok((id.to_string(), level))
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    SortKey::parse(raw)
        .ok_or_else(|| format!("unknown sort key `{raw}` (use score, title, created or param:<id>)"))
}

fn parse_role_pair(raw: &str) -> Result<(String, f64), String> {
    let (role, value) = split_pair(raw)?;
    let fte = value
        .parse::<f64>()
        .map_err(|_| format!("FTE for `{role}` is not a number: {value}"))?;
    Ok((role.to_string(), fte))
}
