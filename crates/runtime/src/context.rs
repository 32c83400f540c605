//! Battle setup context: catalog, arena and the roster being assembled.
//!
//! Everything that used to be reached through process-wide registries is
//! passed around explicitly in a [`BattleContext`].

use std::collections::HashMap;

use battle_core::{
    Arena, BattleEntity, ConfigError, EntityId, EntityOracle, Faction, Roster, SlotId, SpawnError,
};

use crate::oracle::BattleCatalog;

/// Spawns entities into an arena before a battle starts.
#[derive(Debug, Clone)]
pub struct BattleContext {
    catalog: BattleCatalog,
    arena: Arena,
    roster: Roster,
    spawned: HashMap<String, u32>,
}

impl BattleContext {
    /// Creates an empty context. The arena must have slots for both factions.
    pub fn new(catalog: BattleCatalog, arena: Arena) -> Result<Self, ConfigError> {
        arena.validate()?;
        Ok(Self {
            catalog,
            arena,
            roster: Roster::new(),
            spawned: HashMap::new(),
        })
    }

    pub fn catalog(&self) -> &BattleCatalog {
        &self.catalog
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Spawns one entity from the definition called `name` into the
    /// highest-priority free slot of `faction`.
    ///
    /// The new entity starts at full health and resource. Its display name is
    /// the definition name, suffixed with a counter from the second spawn of
    /// the same definition on (`Goblin`, `Goblin 2`, ...).
    pub fn spawn(&mut self, name: &str, faction: Faction) -> Result<EntityId, SpawnError> {
        let definition = self.catalog.entities().require_entity(name)?;
        definition.validate(self.catalog.skills())?;

        let slot = self.arena.next_slot(faction)?;
        let id = self.roster.allocate_id();
        self.arena.occupy(slot, id)?;

        let count = self.spawned.entry(definition.name.clone()).or_insert(0);
        *count += 1;
        let display = if *count == 1 {
            definition.name.clone()
        } else {
            format!("{} {}", definition.name, count)
        };

        let entity = BattleEntity::from_definition(id, display, faction, definition);
        tracing::debug!(entity = %entity, slot = slot.0, "spawned");
        self.roster.push(entity);
        Ok(id)
    }

    /// Spawns every name in order, stopping at the first failure.
    ///
    /// Entities spawned before the failure stay in the arena.
    pub fn spawn_many<I, S>(&mut self, names: I, faction: Faction) -> Result<Vec<EntityId>, SpawnError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.spawn(name.as_ref(), faction))
            .collect()
    }

    /// Frees the slot held by `entity`. The entity itself stays in the roster.
    pub fn release(&mut self, entity: EntityId) -> Result<Option<SlotId>, SpawnError> {
        let Some(slot) = self.arena.slot_of(entity) else {
            return Ok(None);
        };
        self.arena.release(slot)?;
        Ok(Some(slot))
    }

    pub fn into_parts(self) -> (BattleCatalog, Arena, Roster) {
        (self.catalog, self.arena, self.roster)
    }
}
