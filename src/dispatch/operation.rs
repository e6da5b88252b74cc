use crate::error::ProjectError;
use std::fmt;

/// The project operations a command name can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Build,
    Test,
    CleanBuild,
    CleanTest,
    Clean,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Build,
        Operation::Test,
        Operation::CleanBuild,
        Operation::CleanTest,
        Operation::Clean,
    ];

    /// Command-line name of the operation
    pub fn name(self) -> &'static str {
        match self {
            Operation::Build => "build",
            Operation::Test => "test",
            Operation::CleanBuild => "clean_build",
            Operation::CleanTest => "clean_test",
            Operation::Clean => "clean",
        }
    }

    pub fn invoke(self, ops: &dyn Operations) -> Result<(), ProjectError> {
        match self {
            Operation::Build => ops.build(),
            Operation::Test => ops.test(),
            Operation::CleanBuild => ops.clean_build(),
            Operation::CleanTest => ops.clean_test(),
            Operation::Clean => ops.clean(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side-effecting units of work the dispatcher can call
#[cfg_attr(test, mockall::automock)]
pub trait Operations {
    fn build(&self) -> Result<(), ProjectError>;

    fn test(&self) -> Result<(), ProjectError>;

    fn clean_build(&self) -> Result<(), ProjectError>;

    fn clean_test(&self) -> Result<(), ProjectError>;

    /// clean_build then clean_test
    fn clean(&self) -> Result<(), ProjectError> {
        self.clean_build()?;
        self.clean_test()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn test_invoke_routes_to_method() {
        let mut ops = MockOperations::new();
        let mut seq = Sequence::new();
        ops.expect_clean_test()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        ops.expect_build()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        Operation::CleanTest.invoke(&ops).unwrap();
        Operation::Build.invoke(&ops).unwrap();
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::CleanBuild.to_string(), "clean_build");
    }
}
