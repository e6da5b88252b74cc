use super::Project;
use crate::error::Result;
use crate::fs::remove_path;
use tracing::{debug, info};

impl Project {
    pub(super) fn run_clean_build(&self) -> Result<()> {
        let artifacts = self.layout.build_artifacts();

        if !artifacts.iter().any(|path| self.fs.exists(path)) {
            debug!("Nothing to clean");
            return Ok(());
        }

        info!("remove build artifacts");
        for path in artifacts.iter().filter(|path| self.fs.exists(path)) {
            debug!(path = %path.display(), "Removing");
            remove_path(path)?;
        }

        Ok(())
    }

    pub(super) fn run_clean_test(&self) -> Result<()> {
        let env_dir = self.layout.test_env();

        if !self.fs.exists(&env_dir) {
            debug!("Nothing to clean");
            return Ok(());
        }

        info!(env = %env_dir.display(), "remove test env");
        remove_path(&env_dir)
    }
}
