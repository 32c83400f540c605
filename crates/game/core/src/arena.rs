//! Arena and spawn-slot registry.
//!
//! An arena is an ordered list of spawn slots plus a region/area tag used to
//! filter which entity definitions may appear there. Slots are kept sorted by
//! ascending priority; slots sharing a priority keep their insertion order.

use crate::env::ConfigError;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{EntityId, Faction};

bitflags::bitflags! {
    /// Regions an arena belongs to or an entity can be found in.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Region: u8 {
        const ICE    = 1 << 0;
        const DESERT = 1 << 1;
        const FOREST = 1 << 2;
    }
}

/// Index of a slot in the order it was added to its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub u16);

/// A place an entity can spawn into.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSlot {
    pub id: SlotId,
    /// Lower values are filled first.
    pub priority: u8,
    pub faction: Faction,
    pub occupant: Option<EntityId>,
}

impl SpawnSlot {
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Errors raised while placing entities into an arena.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("no free {faction} spawn slot")]
    NoFreeSlot { faction: Faction },

    #[error("unknown spawn slot {0:?}")]
    UnknownSlot(SlotId),

    #[error("spawn slot {slot:?} is already occupied by {occupant}")]
    SlotOccupied { slot: SlotId, occupant: EntityId },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BattleError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoFreeSlot { .. } => ErrorSeverity::Recoverable,
            Self::UnknownSlot(_) | Self::SlotOccupied { .. } => ErrorSeverity::Validation,
            Self::Config(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoFreeSlot { .. } => "SPAWN_NO_FREE_SLOT",
            Self::UnknownSlot(_) => "SPAWN_UNKNOWN_SLOT",
            Self::SlotOccupied { .. } => "SPAWN_SLOT_OCCUPIED",
            Self::Config(err) => err.error_code(),
        }
    }
}

/// Serializable description of a slot, as stored in content files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotDefinition {
    pub priority: u8,
    pub faction: Faction,
}

/// Serializable description of an arena, as stored in content files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub region: Region,
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slots: Vec<SlotDefinition>,
}

/// Spawn registry for one battle location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    pub name: String,
    pub region: Region,
    pub area: String,
    slots: Vec<SpawnSlot>,
    next_slot_id: u16,
}

impl Arena {
    pub fn new(name: impl Into<String>, region: Region, area: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region,
            area: area.into(),
            slots: Vec::new(),
            next_slot_id: 0,
        }
    }

    /// Builds an arena with every slot of `definition` in declaration order.
    pub fn from_definition(definition: &ArenaDefinition) -> Self {
        let mut arena = Self::new(&definition.name, definition.region, &definition.area);
        for slot in &definition.slots {
            arena.add_slot(slot.priority, slot.faction);
        }
        arena
    }

    /// Inserts a slot after every existing slot whose priority is `<= priority`.
    pub fn add_slot(&mut self, priority: u8, faction: Faction) -> SlotId {
        let id = SlotId(self.next_slot_id);
        self.next_slot_id += 1;
        let at = self.slots.partition_point(|s| s.priority <= priority);
        self.slots.insert(
            at,
            SpawnSlot {
                id,
                priority,
                faction,
                occupant: None,
            },
        );
        id
    }

    /// The first empty slot reserved for `faction`, in priority order.
    pub fn next_slot(&self, faction: Faction) -> Result<SlotId, SpawnError> {
        self.slots
            .iter()
            .find(|s| s.faction == faction && s.is_free())
            .map(|s| s.id)
            .ok_or(SpawnError::NoFreeSlot { faction })
    }

    pub fn occupy(&mut self, slot: SlotId, entity: EntityId) -> Result<(), SpawnError> {
        let slot_ref = self.slot_mut(slot)?;
        if let Some(occupant) = slot_ref.occupant {
            return Err(SpawnError::SlotOccupied { slot, occupant });
        }
        slot_ref.occupant = Some(entity);
        Ok(())
    }

    /// Empties a slot and returns whoever was in it.
    pub fn release(&mut self, slot: SlotId) -> Result<Option<EntityId>, SpawnError> {
        Ok(self.slot_mut(slot)?.occupant.take())
    }

    pub fn occupant(&self, slot: SlotId) -> Result<Option<EntityId>, SpawnError> {
        self.slot(slot).map(|s| s.occupant)
    }

    /// Slot containing `entity`, if it was placed in this arena.
    pub fn slot_of(&self, entity: EntityId) -> Option<SlotId> {
        self.slots
            .iter()
            .find(|s| s.occupant == Some(entity))
            .map(|s| s.id)
    }

    /// Number of slots reserved for `faction`, occupied or not.
    pub fn capacity(&self, faction: Faction) -> usize {
        self.slots.iter().filter(|s| s.faction == faction).count()
    }

    pub fn free_slots(&self, faction: Faction) -> usize {
        self.slots
            .iter()
            .filter(|s| s.faction == faction && s.is_free())
            .count()
    }

    /// All slots in priority order.
    pub fn slots(&self) -> &[SpawnSlot] {
        &self.slots
    }

    pub fn ally_slots(&self) -> impl Iterator<Item = &SpawnSlot> {
        self.slots.iter().filter(|s| s.faction == Faction::Ally)
    }

    pub fn enemy_slots(&self) -> impl Iterator<Item = &SpawnSlot> {
        self.slots.iter().filter(|s| s.faction == Faction::Enemy)
    }

    /// Every placed entity, in slot priority order.
    pub fn occupants(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().filter_map(|s| s.occupant)
    }

    /// Fails if either faction has no slot at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for faction in [Faction::Ally, Faction::Enemy] {
            if self.capacity(faction) == 0 {
                return Err(ConfigError::NoSlotsForFaction {
                    arena: self.name.clone(),
                    faction,
                });
            }
        }
        Ok(())
    }

    fn slot(&self, id: SlotId) -> Result<&SpawnSlot, SpawnError> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .ok_or(SpawnError::UnknownSlot(id))
    }

    fn slot_mut(&mut self, id: SlotId) -> Result<&mut SpawnSlot, SpawnError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SpawnError::UnknownSlot(id))
    }
}
