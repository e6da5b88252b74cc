//! Paths under the project root that the operations probe and create

use std::path::{Path, PathBuf};

pub const BUILD_DIR: &str = "build";
pub const MAIN_ENV_DIR: &str = "py-main-env";
pub const TEST_ENV_DIR: &str = "py-test-env";
pub const PYINSTALLER_BUILD_DIR: &str = "pyinstaller-build";
pub const DIST_DIR: &str = "dist";

/// Name given to the bundle; also names the generated `.spec` file
pub const BUNDLE_NAME: &str = "sphinx";

/// Bundler folder that holds collected resources inside the distribution
pub const INTERNAL_DIR: &str = "_internal";

/// Resource folders promoted from `_internal` to the distribution top level
pub const PROMOTED_RESOURCES: [&str; 2] = ["styles", "templates"];

/// Derived layout of the `build/` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    root: PathBuf,
}

impl BuildLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    pub fn main_env(&self) -> PathBuf {
        self.build_dir().join(MAIN_ENV_DIR)
    }

    pub fn test_env(&self) -> PathBuf {
        self.build_dir().join(TEST_ENV_DIR)
    }

    pub fn spec_file(&self) -> PathBuf {
        self.build_dir().join(spec_file_name())
    }

    pub fn pyinstaller_build_dir(&self) -> PathBuf {
        self.build_dir().join(PYINSTALLER_BUILD_DIR)
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.build_dir().join(DIST_DIR)
    }

    /// `build/dist/<bundle>`
    pub fn bundle_dir(&self) -> PathBuf {
        self.dist_dir().join(BUNDLE_NAME)
    }

    pub fn conftest(&self) -> PathBuf {
        self.root.join("tests").join("conftest.py")
    }

    /// Everything `clean_build` removes
    pub fn build_artifacts(&self) -> [PathBuf; 4] {
        [
            self.main_env(),
            self.spec_file(),
            self.pyinstaller_build_dir(),
            self.dist_dir(),
        ]
    }
}

pub fn spec_file_name() -> String {
    format!("{}.spec", BUNDLE_NAME)
}

/// Where an environment may hold an executable: Windows layout first, then POSIX
pub fn executable_candidates(env_dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![
        env_dir.join("Scripts").join(format!("{}.exe", name)),
        env_dir.join("bin").join(name),
    ]
}
