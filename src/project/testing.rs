use super::Project;
use crate::error::{Result, StepKind};
use tracing::info;

/// Optional dependency group with the test runner
const TEST_EXTRA: &str = ".[test]";

impl Project {
    pub(super) fn run_tests(&self) -> Result<()> {
        let python = self.ensure_environment(&self.layout.test_env(), TEST_EXTRA)?;

        info!(entry = %self.test_entry, "run tests");
        let spec = self
            .command(&python)
            .args(["-m", "pytest"])
            .arg(format!(
                "--log-cli-format={}",
                self.logging.test_runner_format()
            ))
            .arg("--log-cli-level=NOTSET")
            .arg("-c")
            .arg(self.layout.conftest())
            .arg("-x")
            .arg(&self.test_entry);

        self.exec(StepKind::Test, "run tests", spec)?;
        Ok(())
    }
}
