//! Content loaders for reading battle inputs from files.
//!
//! Rules come from TOML, scenarios from RON. Both deserialize directly into
//! battle-core types.

pub mod rules;
pub mod scenario;

pub use rules::RulesLoader;
pub use scenario::{ScenarioFile, ScenarioLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
