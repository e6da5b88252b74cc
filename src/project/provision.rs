use super::layout::executable_candidates;
use super::Project;
use crate::error::{ProjectError, Result, StepKind};
use crate::fs::locate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

impl Project {
    /// Finds the environment's interpreter, creating the environment and
    /// installing `requirement` into it when there is none yet.
    pub(super) fn ensure_environment(&self, env_dir: &Path, requirement: &str) -> Result<PathBuf> {
        let candidates = executable_candidates(env_dir, "python");

        if let Some(python) = locate(self.fs.as_ref(), &candidates) {
            debug!(python = %python.display(), "Environment present");
            return Ok(python);
        }

        info!(env = %env_dir.display(), "create env");
        let spec = self
            .command(&self.config.python)
            .args(["-m", "venv"])
            .arg(env_dir);
        self.exec(StepKind::Provisioning, "create env", spec)?;

        let python = self.locate_required("python", &candidates)?;

        info!(requirement, "install dependencies");
        self.pip_install(&python, requirement)?;

        Ok(python)
    }

    pub(super) fn pip_install(&self, python: &Path, requirement: &str) -> Result<()> {
        let spec = self
            .command(python)
            .args(["-m", "pip", "install", requirement]);
        self.exec(StepKind::Provisioning, "install dependencies", spec)?;
        Ok(())
    }

    /// Like [`locate`], but a miss is an error
    pub(super) fn locate_required(
        &self,
        name: &'static str,
        candidates: &[PathBuf],
    ) -> Result<PathBuf> {
        locate(self.fs.as_ref(), candidates).ok_or_else(|| ProjectError::MissingExecutable {
            name,
            candidates: candidates.to_vec(),
        })
    }
}
