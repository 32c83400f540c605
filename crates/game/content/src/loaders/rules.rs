//! Battle rules loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle rules from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rules from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        Ok(config)
    }
}
