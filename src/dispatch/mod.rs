//! Command dispatch
//!
//! Turns the parsed command line into a sequence of operation calls. Names are
//! checked against a static registry before anything runs.

mod invocation;
mod operation;
mod registry;
mod runner;

pub use invocation::{Invocation, DEFAULT_COMMAND, DEFAULT_TEST_ENTRY};
pub use operation::{Operation, Operations};
pub use registry::OperationRegistry;
pub use runner::Dispatcher;

#[cfg(test)]
pub use operation::MockOperations;
