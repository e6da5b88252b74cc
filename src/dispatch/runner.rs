use super::{Invocation, Operation, OperationRegistry, Operations};
use crate::error::ProjectError;
use tracing::{debug, info};

/// The fixed pipeline behind the `default` sentinel
const DEFAULT_PIPELINE: [Operation; 3] = [Operation::Clean, Operation::Build, Operation::Test];

/// Resolves command names and runs the matching operations in order
pub struct Dispatcher {
    registry: OperationRegistry,
}

impl Dispatcher {
    pub fn new(registry: OperationRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Resolves every requested name before anything runs
    ///
    /// Exactly `["default"]` expands to clean, build, test. Otherwise each name
    /// must be registered; duplicates are kept.
    pub fn plan(&self, invocation: &Invocation) -> Result<Vec<Operation>, ProjectError> {
        if invocation.is_default() {
            return Ok(DEFAULT_PIPELINE.to_vec());
        }

        invocation
            .commands()
            .iter()
            .map(|name| {
                self.registry
                    .get(name)
                    .ok_or_else(|| ProjectError::InvalidCommand {
                        command: name.clone(),
                        valid: self
                            .registry
                            .all_names()
                            .into_iter()
                            .map(String::from)
                            .collect(),
                    })
            })
            .collect()
    }

    /// Runs the plan, stopping at the first failing operation
    ///
    /// The error is returned unlogged; the caller reports it.
    pub fn run(&self, invocation: &Invocation, ops: &dyn Operations) -> Result<(), ProjectError> {
        let plan = self.plan(invocation)?;

        debug!(
            plan = ?plan.iter().map(|op| op.name()).collect::<Vec<_>>(),
            "Resolved commands"
        );

        for (index, operation) in plan.iter().enumerate() {
            debug!(operation = %operation, "Starting operation");
            if let Err(e) = operation.invoke(ops) {
                info!(
                    operation = %operation,
                    skipped = plan.len() - index - 1,
                    "Operation failed, aborting"
                );
                return Err(e);
            }
        }

        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(OperationRegistry::new())
    }
}
