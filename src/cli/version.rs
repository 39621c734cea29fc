//! Version command for the explorer CLI.

/// The current version of the explorer, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version line printed by `--version`.
pub fn version_line() -> String {
    format!("explorer {}", VERSION)
}
