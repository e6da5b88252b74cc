pub mod commands;

pub use commands::{normalize_legacy_flags, CliArgs};
