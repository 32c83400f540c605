//! Arena layout loader.

use std::path::Path;

use battle_core::ArenaDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Arena catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaCatalog {
    pub arenas: Vec<ArenaDefinition>,
}

/// Loader for arena layouts from RON files.
pub struct ArenaLoader;

impl ArenaLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ArenaDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ArenaDefinition>> {
        let catalog: ArenaCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse arena catalog RON: {}", e))?;

        ensure_unique("arena", catalog.arenas.iter().map(|a| a.name.as_str()))?;
        Ok(catalog.arenas)
    }
}
