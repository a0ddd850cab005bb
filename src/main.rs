mod challenge;
mod cli;
mod config;
mod error;
mod query;
mod registry;
mod report;
mod roadmap;
mod scoring;
mod store;
mod suggest;
mod types;
mod workspace;

use crate::error::{PrioritizerError, Result};
use crate::query::{SortKey, UseCaseQuery};
use crate::registry::{Move, NewParameter, ParameterEdit, ParameterRegistry};
use crate::store::Store;
use crate::types::challenge::{ChallengeDraft, ChallengeScores};
use crate::types::config::{PrioritizerConfig, RoadmapSettings};
use crate::types::report::RankingReport;
use crate::types::roadmap::{RoadmapPhase, RoleAllocation, ViewMode};
use crate::types::scoring::ScoreMap;
use crate::types::use_case::{Status, UseCaseDraft};
use crate::workspace::Workspace;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const VALIDATION: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

const LOG_ENV: &str = "PRIORITIZER_LOG";

/// `PRIORITIZER_LOG` wins over the verbosity flags. Logs go to stderr so
/// reports on stdout stay machine-readable.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Config and workspace file of one project root.
struct Project {
    root: PathBuf,
    config: Option<PrioritizerConfig>,
    view: Option<ViewMode>,
    store: Store,
}

impl Project {
    fn open(root: &Path) -> Result<Self> {
        let config = config::load_config(root)?;
        let file = config
            .as_ref()
            .map_or(types::config::DEFAULT_WORKSPACE_FILE, |cfg| cfg.workspace_file());
        let store = Store::new(root.join(file));
        Ok(Self {
            root: root.to_path_buf(),
            config,
            view: None,
            store,
        })
    }

    fn settings(&self) -> RoadmapSettings {
        let mut settings = self
            .config
            .as_ref()
            .map(PrioritizerConfig::roadmap_settings)
            .unwrap_or_default();
        if let Some(view) = self.view {
            settings.view = view;
        }
        settings
    }

    fn load(&mut self) -> Result<Workspace> {
        let settings = self.settings();
        Ok(self.store.load()?.with_settings(settings))
    }

    /// Loads, applies `change` and saves only if it succeeded.
    fn update<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Workspace) -> Result<T>,
    {
        let mut workspace = self.load()?;
        let outcome = change(&mut workspace)?;
        self.store.save(&workspace)?;
        Ok(outcome)
    }

    /// Success code, downgraded to a warning when the project has no config.
    fn finish(&self) -> i32 {
        if self.config.is_some() {
            return exit_code::SUCCESS;
        }
        eprintln!(
            "warning: no {} found in {}",
            config::DEFAULT_CONFIG_FILE,
            self.root.display()
        );
        exit_code::WARNINGS
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Init(cmd) => run_init(&cmd),
        cli::Commands::Rank(cmd) => run_rank(cmd),
        cli::Commands::Param(cmd) => run_param(cmd.action),
        cli::Commands::Usecase(cmd) => run_use_case(cmd.action),
        cli::Commands::Roadmap(cmd) => run_roadmap(cmd),
        cli::Commands::Challenge(cmd) => run_challenge(cmd.action),
    }
}

fn starter_config(root: &Path) -> String {
    let name = root
        .canonicalize()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().to_string()))
        .unwrap_or_else(|| "prioritizer".to_string());
    format!(
        "[project]\nname = \"{}\"\n\n[roadmap]\nview = \"timeline\"\ninitial_selection = 5\n",
        name.replace('"', "")
    )
}

fn run_init(cmd: &cli::InitCommand) -> Result<i32> {
    fs::create_dir_all(&cmd.path)?;
    let mut project = Project::open(&cmd.path)?;
    let parameters = project
        .config
        .as_ref()
        .map(PrioritizerConfig::seed_parameters)
        .unwrap_or_else(types::scoring::default_parameters);
    let registry = ParameterRegistry::from_parameters(parameters)?;
    let workspace = Workspace::new(registry, Vec::new(), Vec::new());
    project.store.init(&workspace, cmd.force)?;

    let config_path = cmd.path.join(config::DEFAULT_CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, starter_config(&cmd.path))?;
        println!("created {}", config_path.display());
    }
    println!(
        "initialized workspace {} with {} parameters",
        project.store.path().display(),
        workspace.parameters().len()
    );
    Ok(exit_code::SUCCESS)
}

fn run_rank(cmd: cli::RankCommand) -> Result<i32> {
    let mut project = Project::open(&cmd.path)?;
    let workspace = project.load()?;
    let sort = cmd.sort;
    if let SortKey::Parameter(id) = &sort {
        if !workspace.parameters().iter().any(|parameter| &parameter.id == id) {
            return Err(PrioritizerError::ParameterNotFound(id.clone()));
        }
    }
    let query = UseCaseQuery {
        status: cmd.status.map(Into::into),
        project_id: cmd.project,
        team_id: cmd.team,
        search: cmd.search,
        sort,
        ascending: cmd.asc,
    };

    let ranked = workspace.query(&query);
    let report = RankingReport::new(workspace.parameters(), &ranked);
    println!("{}", report::render_ranking(&report, output_format(&cmd.format))?);
    Ok(project.finish())
}

fn run_param(action: cli::ParamAction) -> Result<i32> {
    match action {
        cli::ParamAction::List { path } => {
            let mut project = Project::open(&path)?;
            let workspace = project.load()?;
            for parameter in workspace.parameters() {
                println!(
                    "{}\t{}\tweight={}\tdirection={}\tdefault={}",
                    parameter.id,
                    parameter.name,
                    parameter.weight,
                    parameter.preferred_direction.as_str(),
                    parameter.fallback_score()
                );
            }
            Ok(project.finish())
        }
        cli::ParamAction::Add {
            path,
            name,
            description,
            weight,
            default_value,
            direction,
        } => {
            let mut project = Project::open(&path)?;
            let id = project.update(|workspace| {
                workspace.add_parameter(NewParameter {
                    name,
                    description,
                    weight,
                    default_value,
                    preferred_direction: direction.into(),
                })
            })?;
            println!("added parameter {id}");
            Ok(project.finish())
        }
        cli::ParamAction::Remove { path, id } => {
            let mut project = Project::open(&path)?;
            let removed = project.update(|workspace| workspace.remove_parameter(&id))?;
            println!("removed parameter {} ({})", removed.id, removed.name);
            Ok(project.finish())
        }
        cli::ParamAction::Move {
            path,
            id,
            direction,
        } => {
            let mut project = Project::open(&path)?;
            let direction = match direction {
                cli::MoveArg::Up => Move::Up,
                cli::MoveArg::Down => Move::Down,
            };
            let moved = project.update(|workspace| workspace.move_parameter(&id, direction))?;
            if moved {
                println!("moved parameter {id}");
            } else {
                println!("parameter {id} is already at the edge");
            }
            Ok(project.finish())
        }
        cli::ParamAction::Edit {
            path,
            id,
            name,
            description,
            weight,
            default_value,
            direction,
        } => {
            let mut project = Project::open(&path)?;
            let edit = ParameterEdit {
                name,
                description,
                weight,
                default_value,
                preferred_direction: direction.map(Into::into),
            };
            project.update(|workspace| workspace.edit_parameter(&id, edit))?;
            println!("updated parameter {id}");
            Ok(project.finish())
        }
    }
}

fn run_use_case(action: cli::UseCaseAction) -> Result<i32> {
    match action {
        cli::UseCaseAction::Add(args) => {
            let mut project = Project::open(&args.path)?;
            let (project_id, team_id) = match &project.config {
                Some(cfg) => (
                    cfg.project_id().map(str::to_string),
                    cfg.team_id().map(str::to_string),
                ),
                None => (None, None),
            };
            let probe = suggest::Draft {
                title: args.title.clone(),
                description: args.description.clone(),
                team: args.team.clone(),
                technologies: args.technologies.clone(),
            };
            let scores = (!args.scores.is_empty())
                .then(|| args.scores.into_iter().collect::<ScoreMap>());
            let draft = UseCaseDraft {
                title: args.title,
                description: args.description,
                scores,
                status: args.status.into(),
                team: args.team,
                technologies: args.technologies,
                business_objective: args.objective,
                expected_outcome: args.outcome,
                success_criteria: args.criteria,
                estimated_time: args.time,
                estimated_resources: args.resources,
                team_id,
                project_id,
            };

            let (similar, id, score) = project.update(|workspace| {
                let similar = workspace
                    .similar(&probe)
                    .into_iter()
                    .map(|(use_case, _)| format!("{} ({})", use_case.title, use_case.id))
                    .collect::<Vec<_>>();
                let id = workspace.add_use_case(draft)?;
                let score = workspace.use_case(&id)?.score;
                Ok((similar, id, score))
            })?;
            println!("added use case {id} (score {score:.1})");
            if !similar.is_empty() {
                println!("similar existing use cases:");
                for entry in similar {
                    println!("- {entry}");
                }
            }
            Ok(project.finish())
        }
        cli::UseCaseAction::Score { path, id, scores } => {
            let mut project = Project::open(&path)?;
            let updates = scores.into_iter().collect::<ScoreMap>();
            let score = project.update(|workspace| {
                workspace.set_scores(&id, updates)?;
                Ok(workspace.use_case(&id)?.score)
            })?;
            println!("use case {id} now scores {score:.1}");
            Ok(project.finish())
        }
        cli::UseCaseAction::Status { path, id, status } => {
            let mut project = Project::open(&path)?;
            let status: Status = status.into();
            project.update(|workspace| workspace.set_status(&id, status))?;
            println!("use case {id} is now {}", status.as_str());
            Ok(project.finish())
        }
        cli::UseCaseAction::Remove { path, id } => {
            let mut project = Project::open(&path)?;
            let removed = project.update(|workspace| workspace.remove_use_case(&id))?;
            println!("removed use case {} ({})", removed.id, removed.title);
            Ok(project.finish())
        }
        cli::UseCaseAction::Similar {
            path,
            title,
            description,
            team,
            technologies,
        } => {
            let mut project = Project::open(&path)?;
            let workspace = project.load()?;
            let probe = suggest::Draft {
                title,
                description,
                team,
                technologies,
            };
            let similar = workspace.similar(&probe);
            if similar.is_empty() {
                println!("similar: none");
            }
            for (use_case, similarity) in similar {
                println!("{}\t{}\tsimilarity={}", use_case.id, use_case.title, similarity);
            }
            Ok(project.finish())
        }
    }
}

fn run_roadmap(cmd: cli::RoadmapCommand) -> Result<i32> {
    let view: Option<ViewMode> = cmd.view.map(Into::into);
    let path = match &cmd.action {
        cli::RoadmapAction::Show { path, .. }
        | cli::RoadmapAction::Add { path, .. }
        | cli::RoadmapAction::Remove { path, .. }
        | cli::RoadmapAction::Move { path, .. }
        | cli::RoadmapAction::Reorder { path, .. }
        | cli::RoadmapAction::Estimate { path, .. }
        | cli::RoadmapAction::Roles { path, .. } => path.clone(),
    };
    let mut project = Project::open(&path)?;
    project.view = view;

    match cmd.action {
        cli::RoadmapAction::Show { format, .. } => {
            let mut workspace = project.load()?;
            if workspace.ensure_roadmap() {
                project.store.save(&workspace)?;
            }
            let roadmap = workspace.roadmap();
            println!("{}", report::render_roadmap(&roadmap, output_format(&format))?);
        }
        cli::RoadmapAction::Add { id, .. } => {
            project.update(|workspace| {
                workspace.ensure_roadmap();
                workspace.add_to_roadmap(&id)
            })?;
            println!("added {id} to the roadmap");
        }
        cli::RoadmapAction::Remove { id, .. } => {
            project.update(|workspace| {
                workspace.ensure_roadmap();
                workspace.remove_from_roadmap(&id)
            })?;
            println!("removed {id} from the roadmap");
        }
        cli::RoadmapAction::Move { id, phase, .. } => {
            let phase: RoadmapPhase = phase.into();
            project.update(|workspace| {
                workspace.ensure_roadmap();
                workspace.move_to_phase(&id, phase)
            })?;
            println!("placed {id} in {phase}");
        }
        cli::RoadmapAction::Reorder { phase, ids, .. } => {
            let phase: RoadmapPhase = phase.into();
            project.update(|workspace| {
                workspace.ensure_roadmap();
                workspace.reorder_phase(phase, &ids)
            })?;
            println!("reordered {phase}");
        }
        cli::RoadmapAction::Estimate { id, weeks, fte, .. } => {
            project.update(|workspace| {
                if let Some(weeks) = weeks {
                    workspace.set_weeks(&id, weeks)?;
                }
                if let Some(fte) = fte {
                    workspace.set_fte(&id, fte)?;
                }
                Ok(())
            })?;
            println!("updated estimates for {id}");
        }
        cli::RoadmapAction::Roles { id, roles, .. } => {
            let allocations = roles
                .iter()
                .map(|(role, fte)| RoleAllocation::new(role, *fte))
                .collect::<Vec<_>>();
            let count = allocations.len();
            project.update(|workspace| workspace.set_roles(&id, allocations))?;
            println!("set {count} role allocations for {id}");
        }
    }
    Ok(project.finish())
}

fn run_challenge(action: cli::ChallengeAction) -> Result<i32> {
    match action {
        cli::ChallengeAction::Add {
            path,
            title,
            category,
            level,
            impact,
            feasibility,
            priority,
        } => {
            let mut project = Project::open(&path)?;
            let scores = match (impact, feasibility, priority) {
                (Some(impact), Some(feasibility), Some(priority)) => Some(ChallengeScores {
                    impact,
                    feasibility,
                    priority,
                }),
                _ => None,
            };
            let draft = ChallengeDraft {
                title,
                category: category.map(Into::into),
                impact: level.map(Into::into),
                scores,
                team_id: project
                    .config
                    .as_ref()
                    .and_then(|cfg| cfg.team_id().map(str::to_string)),
            };
            let id = project.update(|workspace| workspace.add_challenge(draft))?;
            println!("added challenge {id}");
            Ok(project.finish())
        }
        cli::ChallengeAction::List { path } => {
            let mut project = Project::open(&path)?;
            let workspace = project.load()?;
            if workspace.challenges().is_empty() {
                println!("challenges: none");
            }
            for challenge in workspace.challenges() {
                let scores = challenge
                    .scores
                    .map(|s| format!("{}/{}/{}", s.impact, s.feasibility, s.priority))
                    .unwrap_or_else(|| "unscored".to_string());
                println!(
                    "[{}] {}\t{}\t{}\t{}",
                    if challenge.selected { "x" } else { " " },
                    challenge.id,
                    challenge.title,
                    challenge.category.map_or("-", |category| category.as_str()),
                    scores
                );
            }
            Ok(project.finish())
        }
        cli::ChallengeAction::AutoSelect { path } => {
            let mut project = Project::open(&path)?;
            let thresholds = project
                .config
                .as_ref()
                .map(PrioritizerConfig::selection_thresholds)
                .unwrap_or_default();
            let selected =
                project.update(|workspace| Ok(workspace.auto_select_challenges(&thresholds)))?;
            println!("selected {} challenges", selected.len());
            for id in selected {
                println!("- {id}");
            }
            Ok(project.finish())
        }
        cli::ChallengeAction::Promote { path, id } => {
            let mut project = Project::open(&path)?;
            let use_case_id = project.update(|workspace| workspace.promote_challenge(&id))?;
            println!("promoted challenge {id} to use case {use_case_id}");
            Ok(project.finish())
        }
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_validation() {
                exit_code::VALIDATION
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
