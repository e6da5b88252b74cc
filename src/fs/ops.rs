//! Filesystem mutations used by the build and clean steps

use crate::error::{ProjectError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Lexically normalizes a path: drops `.` segments and resolves `..` against
/// the preceding component. Does not touch the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Removes a file or a whole directory tree. Missing paths are not an error.
pub fn remove_path(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ProjectError::filesystem("inspect", path, e)),
    };

    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(|e| ProjectError::filesystem("remove directory", path, e))
    } else {
        fs::remove_file(path).map_err(|e| ProjectError::filesystem("remove file", path, e))
    }
}

/// Copies `src` recursively into `dst`. `dst` must not exist yet.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        return Err(ProjectError::filesystem(
            "copy into",
            dst,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "destination already exists"),
        ));
    }

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ProjectError::filesystem("walk", path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| {
                ProjectError::filesystem(
                    "resolve",
                    entry.path(),
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
                )
            })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| ProjectError::filesystem("create directory", &target, e))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| ProjectError::filesystem("copy file to", &target, e))?;
        }
    }

    Ok(())
}
