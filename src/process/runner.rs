use crate::error::ProcessError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

/// Hard limit for a single external command
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Program name as shown in logs and errors
    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Last argument, if any
    pub fn last_arg(&self) -> Option<&OsStr> {
        self.args.last().map(OsString::as_os_str)
    }

    pub fn has_arg(&self, arg: impl AsRef<OsStr>) -> bool {
        self.args.iter().any(|a| a.as_os_str() == arg.as_ref())
    }
}

/// Captured result of a command that exited successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands on behalf of the operations
pub trait ProcessRunner {
    /// Runs the command to completion. A non-zero exit, a failure to start
    /// and an expired timeout are all returned as errors.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError>;
}

/// Spawns real child processes
///
/// Owns a current-thread tokio runtime that drives the child and its timer,
/// so callers stay fully synchronous.
pub struct SystemRunner {
    runtime: Runtime,
}

impl SystemRunner {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let program = spec.program_name();
        debug!(
            program = %program,
            args = ?spec.args,
            cwd = %spec.cwd.display(),
            timeout_secs = spec.timeout.as_secs(),
            "Running command"
        );

        let mut command = tokio::process::Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = self.runtime.block_on(async {
            let child = command.spawn().map_err(|source| ProcessError::Spawn {
                program: program.clone(),
                source,
            })?;

            match tokio::time::timeout(spec.timeout, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(source)) => Err(ProcessError::Io {
                    program: program.clone(),
                    source,
                }),
                // Dropping the wait future kills the child
                Err(_) => Err(ProcessError::Timeout {
                    program: program.clone(),
                    timeout: spec.timeout,
                }),
            }
        });

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                error!(program = %program, "{}", e);
                return Err(e);
            }
        };

        check_output(
            &program,
            &spec.cwd,
            output.status.success(),
            CommandOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
        )
    }
}

/// Logs captured output and turns an unsuccessful exit into an error
fn check_output(
    program: &str,
    cwd: &Path,
    success: bool,
    output: CommandOutput,
) -> Result<CommandOutput, ProcessError> {
    if success {
        for line in output.stdout.lines() {
            info!(program = %program, "{}", line);
        }
        for line in output.stderr.lines() {
            info!(program = %program, "{}", line);
        }
        return Ok(output);
    }

    error!(program = %program, cwd = %cwd.display(), code = ?output.code, "Command failed");
    if !output.stdout.is_empty() {
        error!("stdout: '{}'", output.stdout);
    }
    if !output.stderr.is_empty() {
        error!("stderr: '{}'", output.stderr);
    }

    Err(ProcessError::Failed {
        program: program.to_string(),
        code: output.code,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
