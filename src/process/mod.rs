//! External process execution
//!
//! Every subprocess the operations start goes through a [`ProcessRunner`].
//! [`SystemRunner`] spawns real children with a hard timeout;
//! [`RecordingRunner`] records the calls for tests.

mod mock;
mod runner;

pub use mock::RecordingRunner;
pub use runner::{CommandOutput, CommandSpec, ProcessRunner, SystemRunner, DEFAULT_TIMEOUT};
