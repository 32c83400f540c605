//! Data-driven battle content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Skill catalogs (data-driven via RON)
//! - Entity definitions with region/area tags (data-driven via RON)
//! - Arena layouts and spawn slots (data-driven via RON)
//! - Battle rules (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in battle state.
//!
//! All loaders use battle-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArenaCatalog, ArenaLoader, ContentCatalog, ContentFactory, EntityCatalog, EntityLoader,
    LoadResult, RulesLoader, SkillCatalog, SkillLoader,
};
