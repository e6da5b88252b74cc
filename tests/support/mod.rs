//! Shared helpers for the integration tests
#![allow(dead_code)]

use sphinx_project::dispatch::Dispatcher;
use sphinx_project::fs::RealFileSystem;
use sphinx_project::process::{CommandOutput, CommandSpec, RecordingRunner};
use sphinx_project::project::Project;
use sphinx_project::util::LoggingConfig;
use sphinx_project::{ProcessError, ProjectConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Path to the compiled binary
pub fn sphinx_project_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sphinx-project"))
}

pub fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("No parent")).expect("Failed to create parent");
    fs::write(path, "").expect("Failed to write file");
}

fn args(spec: &CommandSpec) -> Vec<String> {
    spec.args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn file_name(spec: &CommandSpec) -> String {
    spec.program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Leaves on disk what the real tool would have produced for `spec`
pub fn simulate(root: &Path, spec: &CommandSpec) {
    let args = args(spec);
    let program = file_name(spec);

    if args.iter().any(|a| a == "venv") {
        let env = PathBuf::from(args.last().expect("venv target"));
        touch(&env.join("bin").join("python"));
    } else if args.last().map(String::as_str) == Some(".[pyinstaller]") {
        let env = spec
            .program
            .parent()
            .and_then(Path::parent)
            .expect("interpreter inside an environment");
        touch(&env.join("bin").join("pyi-makespec"));
        touch(&env.join("bin").join("pyinstaller"));
    } else if program == "pyi-makespec" {
        touch(&root.join("build").join("sphinx.spec"));
    } else if program == "pyinstaller" {
        let bundle = root.join("build").join("dist").join("sphinx");
        touch(&bundle.join("sphinx"));
        touch(&bundle.join("_internal").join("styles").join("default.yaml"));
        touch(&bundle.join("_internal").join("templates").join("cover.tmpl"));
        touch(&root.join("build").join("pyinstaller-build").join("warn.txt"));
    }
}

/// Runner that records calls and simulates their results under `root`
pub fn simulating_runner(root: &Path) -> Arc<RecordingRunner> {
    let root = root.to_path_buf();
    Arc::new(RecordingRunner::with_handler(move |spec| {
        simulate(&root, spec);
        Ok(CommandOutput::default())
    }))
}

/// Simulating runner that fails every call to `program`
pub fn failing_runner(root: &Path, program: &'static str) -> Arc<RecordingRunner> {
    let root = root.to_path_buf();
    Arc::new(RecordingRunner::with_handler(move |spec| {
        if file_name(spec) == program {
            return Err(ProcessError::Failed {
                program: spec.program_name(),
                code: Some(1),
                stdout: String::new(),
                stderr: "simulated failure".to_string(),
            });
        }
        simulate(&root, spec);
        Ok(CommandOutput::default())
    }))
}

pub struct TestProject {
    pub dir: TempDir,
    pub runner: Arc<RecordingRunner>,
    pub project: Project,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let runner = simulating_runner(dir.path());
        Self::with_runner(dir, runner, "tests/test_core.py::TestCore::test_1")
    }

    pub fn with_runner(dir: TempDir, runner: Arc<RecordingRunner>, test_entry: &str) -> Self {
        // Same bootstrap interpreter name on every platform
        let mut config = ProjectConfig::for_dir(dir.path());
        config.python = "python3".to_string();

        let project = Project::new(
            config,
            LoggingConfig::default(),
            test_entry,
            Arc::new(RealFileSystem::new()),
            runner.clone(),
        );
        Self {
            dir,
            runner,
            project,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root().join("build")
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::default()
    }

    /// Programs (file names only) in call order
    pub fn programs(&self) -> Vec<String> {
        self.runner.calls().iter().map(file_name).collect()
    }
}
