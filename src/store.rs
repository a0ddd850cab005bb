use crate::error::{PrioritizerError, Result};
use crate::registry::ParameterRegistry;
use crate::types::challenge::Challenge;
use crate::types::scoring::ScoreParameter;
use crate::types::use_case::UseCase;
use crate::workspace::Workspace;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct WorkspaceSnapshot<'a> {
    version: u32,
    saved_at: String,
    parameters: &'a [ScoreParameter],
    use_cases: &'a [UseCase],
    challenges: &'a [Challenge],
}

#[derive(Deserialize)]
struct WorkspaceFile {
    #[serde(default)]
    version: u32,
    parameters: Vec<ScoreParameter>,
    #[serde(default)]
    use_cases: Vec<UseCase>,
    #[serde(default)]
    challenges: Vec<Challenge>,
}

/// JSON file persistence for a [`Workspace`].
///
/// The digest of the file as last read or written is kept so that a save
/// never clobbers a write made by another invocation in between.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    digest: Option<String>,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path, digest: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes a fresh workspace, refusing to replace an existing one unless forced.
    pub fn init(&mut self, workspace: &Workspace, force: bool) -> Result<()> {
        if self.exists() && !force {
            return Err(PrioritizerError::WorkspaceExists(
                self.path.display().to_string(),
            ));
        }
        self.write(workspace)?;
        tracing::info!(path = %self.path.display(), force, "initialized workspace");
        Ok(())
    }

    /// Reads the workspace and brings every cached score up to date.
    pub fn load(&mut self) -> Result<Workspace> {
        if !self.exists() {
            return Err(PrioritizerError::WorkspaceNotFound(
                self.path.display().to_string(),
            ));
        }
        let bytes = fs::read(&self.path)?;
        let file: WorkspaceFile = serde_json::from_slice(&bytes)?;
        if file.version > FORMAT_VERSION {
            tracing::warn!(
                found = file.version,
                supported = FORMAT_VERSION,
                "workspace written by a newer version"
            );
        }

        let registry = ParameterRegistry::from_parameters(file.parameters)?;
        let workspace = Workspace::new(registry, file.use_cases, file.challenges);
        self.digest = Some(sha256_hex(&bytes));
        tracing::debug!(
            path = %self.path.display(),
            use_cases = workspace.use_cases().len(),
            "loaded workspace"
        );
        Ok(workspace)
    }

    pub fn save(&mut self, workspace: &Workspace) -> Result<()> {
        if let Some(expected) = &self.digest {
            let current = match fs::read(&self.path) {
                Ok(bytes) => Some(sha256_hex(&bytes)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
                Err(err) => return Err(err.into()),
            };
            if current.as_ref() != Some(expected) {
                return Err(PrioritizerError::StaleWorkspace(
                    self.path.display().to_string(),
                ));
            }
        }
        self.write(workspace)?;
        tracing::debug!(path = %self.path.display(), "saved workspace");
        Ok(())
    }

    fn write(&mut self, workspace: &Workspace) -> Result<()> {
        let snapshot = WorkspaceSnapshot {
            version: FORMAT_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            parameters: workspace.parameters(),
            use_cases: workspace.use_cases(),
            challenges: workspace.challenges(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json)?;
        fs::rename(&temp_path, &self.path)?;

        self.digest = Some(sha256_hex(json.as_bytes()));
        Ok(())
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
