//! Project operations
//!
//! Each operation is check-then-act: it probes `build/` first and only starts
//! the external commands whose results are missing. Running an operation a
//! second time against unchanged state does nothing but log.

mod build;
mod clean;
pub mod layout;
mod provision;
mod testing;

pub use layout::BuildLayout;

use crate::config::ProjectConfig;
use crate::dispatch::Operations;
use crate::error::{ProjectError, Result, StepKind};
use crate::fs::FileSystem;
use crate::process::{CommandOutput, CommandSpec, ProcessRunner};
use crate::util::LoggingConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::info_span;

/// The project being built, with everything its operations need
pub struct Project {
    config: ProjectConfig,
    logging: LoggingConfig,
    test_entry: String,
    layout: BuildLayout,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn ProcessRunner>,
}

impl Project {
    pub fn new(
        config: ProjectConfig,
        logging: LoggingConfig,
        test_entry: impl Into<String>,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        let layout = BuildLayout::new(config.project_dir.clone());
        Self {
            config,
            logging,
            test_entry: test_entry.into(),
            layout,
            fs,
            runner,
        }
    }

    /// A command rooted at the project directory with the configured timeout
    fn command(&self, program: impl AsRef<Path>) -> CommandSpec {
        CommandSpec::new(program.as_ref(), self.layout.root()).timeout(self.config.command_timeout)
    }

    fn exec(&self, kind: StepKind, step: &'static str, spec: CommandSpec) -> Result<CommandOutput> {
        self.runner
            .run(&spec)
            .map_err(|e| ProjectError::from_process(kind, step, e))
    }
}

impl Operations for Project {
    fn build(&self) -> Result<()> {
        let span = info_span!("build");
        let _entered = span.enter();
        self.run_build()
    }

    fn test(&self) -> Result<()> {
        let span = info_span!("test");
        let _entered = span.enter();
        self.run_tests()
    }

    fn clean_build(&self) -> Result<()> {
        let span = info_span!("clean_build");
        let _entered = span.enter();
        self.run_clean_build()
    }

    fn clean_test(&self) -> Result<()> {
        let span = info_span!("clean_test");
        let _entered = span.enter();
        self.run_clean_test()
    }

    fn clean(&self) -> Result<()> {
        let span = info_span!("clean");
        let _entered = span.enter();
        self.clean_build()?;
        self.clean_test()
    }
}
