//! FileSystem trait definition

use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

/// Read-only existence checks used to decide whether a step already ran
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;
}

/// Returns the first candidate that exists, in the order given.
pub fn locate(fs: &dyn FileSystem, candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| fs.exists(p)).cloned()
}
