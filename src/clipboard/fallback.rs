//! Legacy copy fallback
//!
//! When no native clipboard handle can be opened, the text is staged in a
//! temporary file and piped into whatever copy command the platform ships
//! (`pbcopy`, `clip`, `wl-copy`, `xclip`, `xsel`). The staging file is removed
//! when the write settles, whatever the outcome.

use crate::clipboard::traits::ClipboardWriter;
use crate::utils::platform::copy_command_candidates;
use crate::utils::CopyError;
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::{Builder, NamedTempFile};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Copy command fed through stdin
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: PathBuf,
    args: Vec<String>,
    name: String,
    staging_dir: Option<PathBuf>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        let program = program.into();
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.display().to_string());

        Self {
            program,
            args,
            name,
            staging_dir: None,
        }
    }

    /// Build from a user-supplied command line (program first)
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        let resolved = which::which(program).unwrap_or_else(|_| PathBuf::from(program));
        Some(Self::new(resolved, args.to_vec()))
    }

    /// First platform copy command found on PATH
    pub fn detect() -> Option<Self> {
        for candidate in copy_command_candidates() {
            let Some((program, args)) = candidate.split_first() else {
                continue;
            };
            match which::which(program) {
                Ok(path) => {
                    info!("Using {:?} for clipboard fallback", path);
                    return Some(Self::new(
                        path,
                        args.iter().map(|a| a.to_string()).collect(),
                    ));
                }
                Err(_) => debug!("{} not found on PATH", program),
            }
        }
        None
    }

    /// Stage text in `dir` instead of the system temp directory
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    fn stage(&self, text: &str) -> Result<NamedTempFile, CopyError> {
        let mut builder = Builder::new();
        builder.prefix("htmlclip-").suffix(".txt");
        let mut staging = match &self.staging_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        staging.write_all(text.as_bytes())?;
        staging.flush()?;
        Ok(staging)
    }
}

#[async_trait]
impl ClipboardWriter for CommandClipboard {
    fn id(&self) -> &str {
        &self.name
    }

    async fn write_text(&self, text: &str) -> Result<(), CopyError> {
        // Dropping `staging` deletes the file on every return path below.
        let staging = self.stage(text)?;
        let stdin = staging.reopen()?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| {
                warn!("Fallback: could not run {}: {}", self.name, e);
                CopyError::CommandFailed(format!("{}: {}", self.name, e))
            })?;

        if status.success() {
            debug!("Fallback: copying text with {} was successful", self.name);
            Ok(())
        } else {
            warn!("Fallback: {} exited with {}", self.name, status);
            Err(CopyError::CommandFailed(format!(
                "{} exited with {}",
                self.name, status
            )))
        }
    }
}
