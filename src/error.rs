//! Error types shared by the dispatcher, the operations and the process runner

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single external command
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to start '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("I/O error while running '{program}': {source}")]
    Io { program: String, source: io::Error },

    #[error("Command '{program}' exited with {}", exit_label(*code))]
    Failed {
        program: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Command '{program}' did not finish within {} seconds", timeout.as_secs())]
    Timeout { program: String, timeout: Duration },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl ProcessError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProcessError::Timeout { .. })
    }
}

/// Errors surfaced by operations and the command dispatcher
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("command: '{command}' not in valid commands: [{}]", valid.join(", "))]
    InvalidCommand { command: String, valid: Vec<String> },

    #[error("Provisioning step '{step}' failed: {source}")]
    Provisioning {
        step: &'static str,
        #[source]
        source: ProcessError,
    },

    #[error("Artifact generation step '{step}' failed: {source}")]
    ArtifactGeneration {
        step: &'static str,
        #[source]
        source: ProcessError,
    },

    #[error("Test run failed: {source}")]
    TestFailure {
        #[source]
        source: ProcessError,
    },

    #[error("Step '{step}' timed out: '{program}' exceeded {} seconds", timeout.as_secs())]
    Timeout {
        step: &'static str,
        program: String,
        timeout: Duration,
    },

    #[error("Failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Executable '{name}' not found, checked: {}", display_paths(candidates))]
    MissingExecutable {
        name: &'static str,
        candidates: Vec<PathBuf>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which failure category a subprocess error belongs to when it is not a timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Provisioning,
    ArtifactGeneration,
    Test,
}

impl ProjectError {
    /// Wraps a subprocess error into its category. Timeouts always become
    /// [`ProjectError::Timeout`] so callers can tell them apart.
    pub fn from_process(kind: StepKind, step: &'static str, err: ProcessError) -> Self {
        match err {
            ProcessError::Timeout { program, timeout } => ProjectError::Timeout {
                step,
                program,
                timeout,
            },
            source => match kind {
                StepKind::Provisioning => ProjectError::Provisioning { step, source },
                StepKind::ArtifactGeneration => ProjectError::ArtifactGeneration { step, source },
                StepKind::Test => ProjectError::TestFailure { source },
            },
        }
    }

    pub fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProjectError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProjectError::Timeout { .. })
    }
}

pub type Result<T, E = ProjectError> = std::result::Result<T, E>;
