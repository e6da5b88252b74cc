use super::layout::{
    executable_candidates, spec_file_name, BUILD_DIR, BUNDLE_NAME, DIST_DIR, INTERNAL_DIR,
    PROMOTED_RESOURCES, PYINSTALLER_BUILD_DIR,
};
use super::Project;
use crate::error::{Result, StepKind};
use crate::fs::{copy_dir_all, locate};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Packages whose code, data and metadata the bundle must carry
const COLLECT_ALL: [&str; 14] = [
    "sphinx",
    "sphinxcontrib.applehelp",
    "sphinxcontrib.devhelp",
    "sphinxcontrib.htmlhelp",
    "sphinxcontrib.jquery",
    "sphinxcontrib.jsmath",
    "sphinxcontrib.qthelp",
    "sphinxcontrib.serializinghtml",
    "linuxdoc",
    "breathe",
    "mlx.traceability",
    "docxbuilder",
    "rst2pdf",
    "latex2mathml",
];

/// `source:destination` pairs, relative to the spec directory
const ADD_DATA: [&str; 3] = [
    "py-main-env/Lib/site-packages/mlx/assets/*:mlx/assets",
    "py-main-env/Lib/site-packages/rst2pdf/styles/*:styles",
    "py-main-env/Lib/site-packages/rst2pdf/templates/*:templates",
];

const ENTRY_SCRIPT: &str = "src/exqudens/sphinx.py";

/// Optional dependency group that provides the bundler
const PACKAGING_EXTRA: &str = ".[pyinstaller]";

impl Project {
    pub(super) fn run_build(&self) -> Result<()> {
        let env_dir = self.layout.main_env();
        let python = self.ensure_environment(&env_dir, ".")?;
        let (makespec, pyinstaller) = self.ensure_packaging_tools(&env_dir, &python)?;

        if self.fs.exists(&self.layout.spec_file()) {
            debug!(spec = %self.layout.spec_file().display(), "Spec present");
        } else {
            info!("create spec");
            self.exec(
                StepKind::ArtifactGeneration,
                "create spec",
                self.makespec_command(&makespec),
            )?;
        }

        if self.fs.exists(&self.layout.dist_dir()) {
            debug!(dist = %self.layout.dist_dir().display(), "Distribution present");
        } else {
            info!("create executable dir");
            self.exec(
                StepKind::ArtifactGeneration,
                "create executable dir",
                self.bundle_command(&pyinstaller),
            )?;
            self.promote_resources()?;
        }

        Ok(())
    }

    /// Returns `(pyi-makespec, pyinstaller)`, installing the packaging extra
    /// when either is missing
    fn ensure_packaging_tools(&self, env_dir: &Path, python: &Path) -> Result<(PathBuf, PathBuf)> {
        let makespec_candidates = executable_candidates(env_dir, "pyi-makespec");
        let pyinstaller_candidates = executable_candidates(env_dir, "pyinstaller");

        let makespec = locate(self.fs.as_ref(), &makespec_candidates);
        let pyinstaller = locate(self.fs.as_ref(), &pyinstaller_candidates);

        if let (Some(makespec), Some(pyinstaller)) = (makespec, pyinstaller) {
            return Ok((makespec, pyinstaller));
        }

        info!(requirement = PACKAGING_EXTRA, "install dependencies");
        self.pip_install(python, PACKAGING_EXTRA)?;

        Ok((
            self.locate_required("pyi-makespec", &makespec_candidates)?,
            self.locate_required("pyinstaller", &pyinstaller_candidates)?,
        ))
    }

    fn makespec_command(&self, makespec: &Path) -> crate::process::CommandSpec {
        let mut spec = self.command(makespec).args(["--specpath", BUILD_DIR]);
        for package in COLLECT_ALL {
            spec = spec.args(["--collect-all", package]);
        }
        for data in ADD_DATA {
            spec = spec.args(["--add-data", data]);
        }
        spec.args(["--contents-directory", INTERNAL_DIR])
            .args(["--name", BUNDLE_NAME])
            .arg(ENTRY_SCRIPT)
    }

    fn bundle_command(&self, pyinstaller: &Path) -> crate::process::CommandSpec {
        self.command(pyinstaller)
            .arg("--workpath")
            .arg(format!("{}/{}", BUILD_DIR, PYINSTALLER_BUILD_DIR))
            .arg("--distpath")
            .arg(format!("{}/{}", BUILD_DIR, DIST_DIR))
            .arg(format!("{}/{}", BUILD_DIR, spec_file_name()))
    }

    /// Copies styles and templates next to the executable
    fn promote_resources(&self) -> Result<()> {
        let bundle = self.layout.bundle_dir();
        for resource in PROMOTED_RESOURCES {
            let src = bundle.join(INTERNAL_DIR).join(resource);
            let dst = bundle.join(resource);
            debug!(from = %src.display(), to = %dst.display(), "Promoting resource folder");
            copy_dir_all(&src, &dst)?;
        }
        Ok(())
    }
}
