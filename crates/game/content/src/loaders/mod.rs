//! Content loaders for reading battle data from files.
//!
//! This module provides loaders that convert RON/TOML files into the
//! definition types used by `battle-core` oracles.

pub mod arenas;
pub mod entities;
pub mod factory;
pub mod rules;
pub mod skills;

pub use arenas::{ArenaCatalog, ArenaLoader};
pub use entities::{EntityCatalog, EntityLoader};
pub use factory::{ContentCatalog, ContentFactory};
pub use rules::RulesLoader;
pub use skills::{SkillCatalog, SkillLoader};

use std::collections::HashSet;
use std::path::Path;

use battle_core::ConfigError;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects catalogs that define the same name twice.
pub(crate) fn ensure_unique<'a>(
    kind: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateDefinition {
                kind,
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}
