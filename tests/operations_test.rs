//! Operation integration tests
//!
//! Runs the real operations against a temporary project directory. External
//! commands are recorded and their on-disk results simulated.

mod support;

use sphinx_project::dispatch::{Invocation, Operations, DEFAULT_TEST_ENTRY};
use sphinx_project::ProjectError;
use std::ffi::OsStr;
use std::fs;
use support::{failing_runner, touch, TestProject};
use tempfile::TempDir;
use tracing::Level;

fn invocation(commands: &[&str]) -> Invocation {
    Invocation::new(
        Level::INFO,
        commands.iter().map(|c| c.to_string()).collect(),
        DEFAULT_TEST_ENTRY,
    )
}

#[test]
fn test_build_from_scratch() {
    let t = TestProject::new();

    t.project.build().unwrap();

    assert_eq!(
        t.programs(),
        vec!["python3", "python", "python", "pyi-makespec", "pyinstaller"]
    );

    let calls = t.runner.calls();
    assert_eq!(calls[1].last_arg(), Some(OsStr::new(".")));
    assert_eq!(calls[2].last_arg(), Some(OsStr::new(".[pyinstaller]")));
    for call in &calls {
        assert_eq!(call.cwd, t.root());
    }

    let bundle = t.build_dir().join("dist").join("sphinx");
    assert!(t.build_dir().join("sphinx.spec").exists());
    assert!(bundle.join("styles").join("default.yaml").exists());
    assert!(bundle.join("templates").join("cover.tmpl").exists());
    assert!(bundle.join("_internal").join("styles").exists());
}

#[test]
fn test_build_twice_is_idempotent() {
    let t = TestProject::new();

    t.project.build().unwrap();
    t.runner.clear();
    t.project.build().unwrap();

    assert_eq!(t.runner.call_count(), 0);
}

#[test]
fn test_build_regenerates_only_missing_dist() {
    let t = TestProject::new();
    t.project.build().unwrap();
    fs::remove_dir_all(t.build_dir().join("dist")).unwrap();
    t.runner.clear();

    t.project.build().unwrap();

    assert_eq!(t.programs(), vec!["pyinstaller"]);
}

#[test]
fn test_clean_build_removes_every_artifact() {
    let t = TestProject::new();
    t.project.build().unwrap();
    touch(&t.build_dir().join("py-test-env").join("bin").join("python"));

    t.project.clean_build().unwrap();

    for name in ["py-main-env", "sphinx.spec", "pyinstaller-build", "dist"] {
        assert!(!t.build_dir().join(name).exists(), "{} should be gone", name);
    }
    assert!(t.build_dir().join("py-test-env").exists());
}

#[test]
fn test_clean_build_twice_is_noop() {
    let t = TestProject::new();
    t.project.build().unwrap();
    t.project.clean_build().unwrap();
    t.runner.clear();

    let before: Vec<_> = fs::read_dir(t.build_dir()).unwrap().collect();
    t.project.clean_build().unwrap();
    let after: Vec<_> = fs::read_dir(t.build_dir()).unwrap().collect();

    assert_eq!(before.len(), after.len());
    assert_eq!(t.runner.call_count(), 0);
}

#[test]
fn test_clean_build_removes_partial_state() {
    let t = TestProject::new();
    touch(&t.build_dir().join("sphinx.spec"));

    t.project.clean_build().unwrap();

    assert!(!t.build_dir().join("sphinx.spec").exists());
}

#[test]
fn test_test_provisions_separate_environment() {
    let t = TestProject::new();

    t.project.test().unwrap();

    let calls = t.runner.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].has_arg("venv"));
    assert_eq!(
        calls[0].last_arg(),
        Some(t.build_dir().join("py-test-env").as_os_str())
    );
    assert_eq!(calls[1].last_arg(), Some(OsStr::new(".[test]")));
    assert!(calls[2].has_arg("pytest"));
    assert!(!t.build_dir().join("py-main-env").exists());
}

#[test]
fn test_test_reuses_environment() {
    let t = TestProject::new();
    t.project.test().unwrap();
    t.runner.clear();

    t.project.test().unwrap();

    let calls = t.runner.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].has_arg("pytest"));
}

#[test]
fn test_custom_test_entry_is_last_pytest_argument() {
    let dir = TempDir::new().unwrap();
    let runner = support::simulating_runner(dir.path());
    let t = TestProject::with_runner(dir, runner, "tests/test_core.py::TestCore::test_2");

    t.project.test().unwrap();

    let pytest = t.runner.calls().into_iter().last().unwrap();
    assert_eq!(
        pytest.last_arg(),
        Some(OsStr::new("tests/test_core.py::TestCore::test_2"))
    );
}

#[test]
fn test_clean_test_twice_without_env() {
    let t = TestProject::new();

    t.dispatcher()
        .run(&invocation(&["clean_test", "clean_test"]), &t.project)
        .unwrap();

    assert_eq!(t.runner.call_count(), 0);
    assert!(!t.build_dir().exists());
}

#[test]
fn test_clean_removes_both_environments() {
    let t = TestProject::new();
    t.project.build().unwrap();
    t.project.test().unwrap();

    t.project.clean().unwrap();

    assert!(!t.build_dir().join("py-main-env").exists());
    assert!(!t.build_dir().join("py-test-env").exists());
    assert!(!t.build_dir().join("dist").exists());
}

#[test]
fn test_default_pipeline() {
    let t = TestProject::new();
    touch(&t.build_dir().join("sphinx.spec"));

    t.dispatcher()
        .run(&invocation(&["default"]), &t.project)
        .unwrap();

    let programs = t.programs();
    // The stale spec was cleaned first, so it is generated again
    assert!(programs.contains(&"pyi-makespec".to_string()));
    assert_eq!(programs.last().map(String::as_str), Some("python"));
    assert!(t.runner.calls().last().unwrap().has_arg("pytest"));
}

#[test]
fn test_default_pipeline_stops_after_failed_build() {
    let dir = TempDir::new().unwrap();
    let runner = failing_runner(dir.path(), "pyinstaller");
    let t = TestProject::with_runner(dir, runner, DEFAULT_TEST_ENTRY);

    let err = t
        .dispatcher()
        .run(&invocation(&["default"]), &t.project)
        .unwrap_err();

    assert!(matches!(
        err,
        ProjectError::ArtifactGeneration {
            step: "create executable dir",
            ..
        }
    ));
    assert!(!t.runner.calls().iter().any(|c| c.has_arg("pytest")));
    assert!(!t.build_dir().join("py-test-env").exists());
}

#[test]
fn test_invalid_command_touches_nothing() {
    let t = TestProject::new();

    let err = t
        .dispatcher()
        .run(&invocation(&["clean_test", "bogus"]), &t.project)
        .unwrap_err();

    match err {
        ProjectError::InvalidCommand { command, valid } => {
            assert_eq!(command, "bogus");
            assert_eq!(valid.len(), 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(t.runner.call_count(), 0);
    assert!(!t.build_dir().exists());
}

#[test]
fn test_failed_provisioning_is_reported() {
    let dir = TempDir::new().unwrap();
    let runner = failing_runner(dir.path(), "python3");
    let t = TestProject::with_runner(dir, runner, DEFAULT_TEST_ENTRY);

    let err = t.project.build().unwrap_err();

    assert!(matches!(
        err,
        ProjectError::Provisioning {
            step: "create env",
            ..
        }
    ));
    assert_eq!(t.runner.call_count(), 1);
    assert!(!t.build_dir().join("sphinx.spec").exists());
}
