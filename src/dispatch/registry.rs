use super::Operation;
use std::collections::BTreeMap;

/// Static mapping of command names to operations
///
/// Only the entries declared here are valid commands. The dispatcher itself
/// and the `default` sentinel are never registered.
pub struct OperationRegistry {
    operations: BTreeMap<&'static str, Operation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        let operations = Operation::ALL
            .iter()
            .map(|op| (op.name(), *op))
            .collect();

        Self { operations }
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Operation> {
        self.operations.get(name).copied()
    }

    /// All registered names, sorted
    pub fn all_names(&self) -> Vec<&'static str> {
        self.operations.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
