//! sphinx-project - project automation for the bundled Sphinx distribution
//!
//! A single command dispatcher that provisions Python environments, bundles
//! the documentation tool with PyInstaller and runs its tests.
//!
//! # Core Concepts
//!
//! - **Operations**: `build`, `test`, `clean`, `clean_build`, `clean_test`.
//!   Each one probes `build/` first and only runs the external commands whose
//!   results are missing, so running it again is a no-op.
//! - **Registry**: the static set of operation names the dispatcher accepts.
//!   Unknown names fail the whole run before anything executes.
//! - **Default pipeline**: with no commands, clean, build and test run in order.
//!
//! # Example Usage
//!
//! ```no_run
//! use sphinx_project::dispatch::{Dispatcher, Invocation};
//! use sphinx_project::fs::RealFileSystem;
//! use sphinx_project::process::SystemRunner;
//! use sphinx_project::project::Project;
//! use sphinx_project::util::LoggingConfig;
//! use sphinx_project::ProjectConfig;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let invocation = Invocation::default();
//! let project = Project::new(
//!     ProjectConfig::from_env()?,
//!     LoggingConfig::default(),
//!     invocation.test_entry(),
//!     Arc::new(RealFileSystem::new()),
//!     Arc::new(SystemRunner::new()?),
//! );
//!
//! Dispatcher::default().run(&invocation, &project)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`cli`]: command-line parsing
//! - [`dispatch`]: registry and dispatcher
//! - [`project`]: the operations and the `build/` layout
//! - [`process`]: external command execution
//! - [`fs`]: filesystem probing

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fs;
pub mod process;
pub mod project;
pub mod util;

pub use config::{ConfigError, ProjectConfig};
pub use dispatch::{Dispatcher, Invocation, Operation, OperationRegistry, Operations};
pub use error::{ProcessError, ProjectError};
pub use project::Project;
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
