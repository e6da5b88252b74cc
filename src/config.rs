//! Configuration for sphinx-project
//!
//! Settings come from environment variables with defaults. The command line
//! only carries what changes per run (log level, commands, test entry).
//!
//! # Environment Variables
//!
//! - `SPHINX_PROJECT_DIR`: Project root - default: current directory
//! - `SPHINX_PROJECT_PYTHON`: Interpreter used to create environments
//!   (`<python> -m venv <dir>`) - default: `py` on Windows, `python3` elsewhere
//! - `SPHINX_PROJECT_TIMEOUT`: Per-command timeout in seconds - default: "180"
//!
//! # Example
//!
//! ```no_run
//! use sphinx_project::ProjectConfig;
//!
//! let config = ProjectConfig::from_env().expect("invalid environment");
//! config.validate().expect("invalid configuration");
//! println!("project root: {}", config.project_dir.display());
//! ```

use crate::fs::normalize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PROJECT_DIR: &str = "SPHINX_PROJECT_DIR";
pub const ENV_PYTHON: &str = "SPHINX_PROJECT_PYTHON";
pub const ENV_TIMEOUT: &str = "SPHINX_PROJECT_TIMEOUT";

const DEFAULT_TIMEOUT_SECS: u64 = 180;

#[cfg(windows)]
const DEFAULT_PYTHON: &str = "py";
#[cfg(not(windows))]
const DEFAULT_PYTHON: &str = "python3";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Current directory could not be determined
    #[error("Failed to determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Absolute, normalized project root
    pub project_dir: PathBuf,

    /// Interpreter that creates the isolated environments
    pub python: String,

    /// Hard limit for each external command
    pub command_timeout: Duration,
}

impl ProjectConfig {
    /// Configuration rooted at `project_dir` with default interpreter and timeout
    pub fn for_dir(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: normalize(&project_dir.into()),
            python: DEFAULT_PYTHON.to_string(),
            command_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = env::current_dir().map_err(ConfigError::CurrentDir)?;

        let project_dir = match env::var_os(ENV_PROJECT_DIR) {
            Some(dir) if !dir.is_empty() => {
                let dir = PathBuf::from(dir);
                if dir.is_absolute() {
                    dir
                } else {
                    cwd.join(dir)
                }
            }
            _ => cwd,
        };

        let mut config = Self::for_dir(project_dir);

        if let Ok(python) = env::var(ENV_PYTHON) {
            config.python = python;
        }

        if let Ok(timeout) = env::var(ENV_TIMEOUT) {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::ParseError {
                    field: ENV_TIMEOUT.to_string(),
                    error: e.to_string(),
                })?;
            config.command_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_timeout.is_zero() {
            return Err(ConfigError::ValidationFailed(
                "command timeout must be greater than 0".to_string(),
            ));
        }

        if self.python.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "python interpreter cannot be empty".to_string(),
            ));
        }

        if !self.project_dir.is_dir() {
            return Err(ConfigError::ValidationFailed(format!(
                "project directory does not exist: {}",
                self.project_dir.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var(ENV_PROJECT_DIR);
        env::remove_var(ENV_PYTHON);
        env::remove_var(ENV_TIMEOUT);
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ProjectConfig::from_env().unwrap();

        assert_eq!(config.project_dir, normalize(&env::current_dir().unwrap()));
        assert_eq!(config.python, DEFAULT_PYTHON);
        assert_eq!(config.command_timeout, Duration::from_secs(180));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        let temp = TempDir::new().unwrap();
        env::set_var(ENV_PROJECT_DIR, temp.path());
        env::set_var(ENV_PYTHON, "python3.12");
        env::set_var(ENV_TIMEOUT, "30");

        let config = ProjectConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.project_dir, normalize(temp.path()));
        assert_eq!(config.python, "python3.12");
        assert_eq!(config.command_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_invalid_timeout() {
        clear_env();
        env::set_var(ENV_TIMEOUT, "soon");

        let result = ProjectConfig::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let temp = TempDir::new().unwrap();
        let mut config = ProjectConfig::for_dir(temp.path());
        config.command_timeout = Duration::ZERO;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_python() {
        let temp = TempDir::new().unwrap();
        let mut config = ProjectConfig::for_dir(temp.path());
        config.python = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_dir() {
        let config = ProjectConfig::for_dir("/nonexistent/path/12345");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_for_dir_normalizes() {
        let config = ProjectConfig::for_dir("/repo/./docs/..");
        assert_eq!(config.project_dir, PathBuf::from("/repo"));
    }
}
