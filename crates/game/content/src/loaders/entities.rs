//! Entity definition loader.

use std::path::Path;

use battle_core::EntityDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Entity catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCatalog {
    pub entities: Vec<EntityDefinition>,
}

/// Loader for entity definitions from RON files.
///
/// Only the file format is checked here. Skillset references are validated
/// against the skill catalog by [`crate::ContentFactory::load_catalog`].
pub struct EntityLoader;

impl EntityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EntityDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EntityDefinition>> {
        let catalog: EntityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse entity catalog RON: {}", e))?;

        ensure_unique("entity", catalog.entities.iter().map(|e| e.name.as_str()))?;
        Ok(catalog.entities)
    }
}
