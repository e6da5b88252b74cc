//! Filesystem probing and the few mutations the clean and build steps need

mod mock;
mod ops;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use ops::{copy_dir_all, normalize, remove_path};
pub use r#trait::{locate, FileSystem, FileType};
pub use real::RealFileSystem;
