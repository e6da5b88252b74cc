use super::{CommandOutput, CommandSpec, ProcessRunner};
use crate::error::ProcessError;
use std::sync::{Mutex, MutexGuard, PoisonError};

type Handler = Box<dyn Fn(&CommandSpec) -> Result<CommandOutput, ProcessError> + Send + Sync>;

/// Records every command instead of spawning it
///
/// The optional handler runs for each call and decides the outcome. Tests use
/// it to simulate what the real tool would leave on disk.
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    handler: Handler,
}

impl RecordingRunner {
    /// Every command succeeds with empty output
    pub fn new() -> Self {
        Self::with_handler(|_| Ok(CommandOutput::default()))
    }

    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> Result<CommandOutput, ProcessError> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CommandSpec>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        self.lock().push(spec.clone());
        (self.handler)(spec)
    }
}
