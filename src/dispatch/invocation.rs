use tracing::Level;

/// Sentinel command selecting the clean, build, test pipeline
pub const DEFAULT_COMMAND: &str = "default";

pub const DEFAULT_TEST_ENTRY: &str = "tests/test_core.py::TestCore::test_1";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    log_level: Level,
    commands: Vec<String>,
    test_entry: String,
}

impl Invocation {
    /// An empty command list falls back to the default pipeline
    pub fn new(log_level: Level, commands: Vec<String>, test_entry: impl Into<String>) -> Self {
        let commands = if commands.is_empty() {
            vec![DEFAULT_COMMAND.to_string()]
        } else {
            commands
        };

        Self {
            log_level,
            commands,
            test_entry: test_entry.into(),
        }
    }

    pub fn log_level(&self) -> Level {
        self.log_level
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn test_entry(&self) -> &str {
        &self.test_entry
    }

    /// True only for exactly `["default"]`
    pub fn is_default(&self) -> bool {
        matches!(self.commands.as_slice(), [only] if only == DEFAULT_COMMAND)
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self::new(Level::INFO, Vec::new(), DEFAULT_TEST_ENTRY)
    }
}
