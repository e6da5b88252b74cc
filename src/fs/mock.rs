use super::{FileSystem, FileType};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory filesystem for probe-only tests
pub struct MockFileSystem {
    entries: RwLock<HashMap<PathBuf, FileType>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            root,
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.write();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut entries, parent);
        }
        entries.insert(path, FileType::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.write();

        Self::ensure_parents(&mut entries, &path);
        entries.insert(path, FileType::Directory);
    }

    /// Drops the path and everything below it
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.write().retain(|p, _| !p.starts_with(&path));
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(entries: &mut HashMap<PathBuf, FileType>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            entries
                .entry(current.clone())
                .or_insert(FileType::Directory);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, FileType>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, FileType>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn file_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.read().get(&path).copied()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.file_type(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.file_type(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.file_type(path) == Some(FileType::File)
    }
}
