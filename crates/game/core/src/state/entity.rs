use std::fmt;

use crate::env::EntityDefinition;
use crate::stats::EntityStats;

/// Unique identifier for a combatant within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side a combatant fights on.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Ally,
    Enemy,
}

impl Faction {
    /// The opposing faction.
    pub const fn opponent(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }
}

/// A combatant taking part in a battle.
///
/// Dead entities stay in the roster (their health is simply zero) so the UI can
/// keep showing them; the engine skips them when resolving.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEntity {
    pub id: EntityId,
    /// Display name, unique within a battle.
    pub name: String,
    /// Catalog key of the definition this entity was spawned from.
    pub definition: String,
    pub faction: Faction,
    pub stats: EntityStats,
    pub skillset: Vec<String>,
    health: f32,
    resource: f32,
}

impl BattleEntity {
    /// Creates an entity with full health and resource.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        faction: Faction,
        stats: EntityStats,
        skillset: Vec<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id,
            definition: name.clone(),
            name,
            faction,
            health: stats.max_health.max(0.0),
            resource: stats.max_resource.max(0.0),
            stats,
            skillset,
        }
    }

    /// Instantiates a catalog definition under the given display name.
    pub fn from_definition(
        id: EntityId,
        name: impl Into<String>,
        faction: Faction,
        definition: &EntityDefinition,
    ) -> Self {
        let mut entity = Self::new(
            id,
            name,
            faction,
            definition.stats,
            definition.skillset.clone(),
        );
        entity.definition = definition.name.clone();
        entity
    }

    /// Overrides current health (clamped), for setups that start wounded.
    #[must_use]
    pub fn with_health(mut self, health: f32) -> Self {
        self.set_health(health);
        self
    }

    /// Overrides current resource (clamped).
    #[must_use]
    pub fn with_resource(mut self, resource: f32) -> Self {
        self.set_resource(resource);
        self
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn resource(&self) -> f32 {
        self.resource
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn is_ally_of(&self, other: &BattleEntity) -> bool {
        self.faction == other.faction
    }

    pub fn is_enemy_of(&self, other: &BattleEntity) -> bool {
        !self.is_ally_of(other)
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skillset.iter().any(|s| s == skill)
    }

    /// Sets health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, value: f32) {
        self.health = clamp_pool(value, self.stats.max_health);
    }

    /// Sets resource, clamped to `[0, max_resource]`.
    pub fn set_resource(&mut self, value: f32) {
        self.resource = clamp_pool(value, self.stats.max_resource);
    }

    /// Adds `delta` to health (negative for damage) and returns the change that
    /// actually happened after clamping.
    pub fn apply_health_delta(&mut self, delta: f32) -> f32 {
        let before = self.health;
        self.set_health(before + delta);
        self.health - before
    }

    /// Deducts `cost` from the resource pool and returns the amount actually spent.
    pub fn spend_resource(&mut self, cost: f32) -> f32 {
        let before = self.resource;
        self.set_resource(before - cost);
        before - self.resource
    }
}

impl fmt::Display for BattleEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.faction, self.name)
    }
}

/// Clamps a pool value to `[0, max]`. A zero or negative maximum pins the pool at zero.
fn clamp_pool(value: f32, max: f32) -> f32 {
    let max = max.max(0.0);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}
