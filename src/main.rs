use sphinx_project::cli::CliArgs;
use sphinx_project::dispatch::{Dispatcher, Invocation};
use sphinx_project::fs::RealFileSystem;
use sphinx_project::process::SystemRunner;
use sphinx_project::project::Project;
use sphinx_project::util::{init_logging, LoggingConfig};
use sphinx_project::{ProjectConfig, NAME, VERSION};

use anyhow::Context;
use std::process;
use std::sync::Arc;
use tracing::{debug, error};

fn main() {
    let args = match CliArgs::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    let invocation = args.into_invocation();

    // Logging comes up before anything that can fail
    let logging = LoggingConfig::with_level(invocation.log_level());
    init_logging(&logging);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Invocation: {:?}", invocation);

    let exit_code = match run(&invocation, logging) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn run(invocation: &Invocation, logging: LoggingConfig) -> anyhow::Result<()> {
    let dispatcher = Dispatcher::default();

    // Reject unknown commands before touching the filesystem
    dispatcher.plan(invocation)?;

    let config = ProjectConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    debug!(
        project_dir = %config.project_dir.display(),
        python = %config.python,
        timeout_secs = config.command_timeout.as_secs(),
        "Configuration loaded"
    );

    let runner = SystemRunner::new().context("Failed to start the process runtime")?;
    let project = Project::new(
        config,
        logging,
        invocation.test_entry(),
        Arc::new(RealFileSystem::new()),
        Arc::new(runner),
    );

    dispatcher.run(invocation, &project)?;
    Ok(())
}
