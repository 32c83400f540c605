use super::{BattleEntity, EntityId, Faction};

/// Every combatant in a battle, in spawn order.
///
/// Entity ids are allocated sequentially and never reused, so an id stays valid
/// for the whole battle even after its entity dies.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    entities: Vec<BattleEntity>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next entity id.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds an entity, bumping the id allocator past its id if needed.
    pub fn push(&mut self, entity: BattleEntity) -> EntityId {
        let id = entity.id;
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&BattleEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut BattleEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BattleEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEntity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn faction(&self, faction: Faction) -> impl Iterator<Item = &BattleEntity> {
        self.entities.iter().filter(move |e| e.faction == faction)
    }

    pub fn living(&self) -> impl Iterator<Item = &BattleEntity> {
        self.entities.iter().filter(|e| e.is_alive())
    }

    /// True when every member of `faction` is dead (vacuously true for an empty side).
    pub fn all_dead(&self, faction: Faction) -> bool {
        self.faction(faction).all(|e| e.is_dead())
    }

    pub fn count(&self, faction: Faction) -> usize {
        self.faction(faction).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<BattleEntity> for Roster {
    fn from_iter<T: IntoIterator<Item = BattleEntity>>(iter: T) -> Self {
        let mut roster = Roster::new();
        for entity in iter {
            roster.push(entity);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EntityStats;

    fn entity(roster: &mut Roster, name: &str, faction: Faction) -> EntityId {
        let id = roster.allocate_id();
        roster.push(BattleEntity::new(
            id,
            name,
            faction,
            EntityStats::new(10.0, 5.0),
            Vec::new(),
        ))
    }

    #[test]
    fn ids_are_sequential_and_lookup_works() {
        let mut roster = Roster::new();
        let a = entity(&mut roster, "Knight", Faction::Ally);
        let b = entity(&mut roster, "Goblin", Faction::Enemy);
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(roster.get(b).map(|e| e.name.as_str()), Some("Goblin"));
        assert_eq!(roster.find_by_name("Knight").map(|e| e.id), Some(a));
    }

    #[test]
    fn all_dead_tracks_each_faction() {
        let mut roster = Roster::new();
        let a = entity(&mut roster, "Knight", Faction::Ally);
        entity(&mut roster, "Goblin", Faction::Enemy);

        assert!(!roster.all_dead(Faction::Ally));
        roster.get_mut(a).unwrap().set_health(0.0);
        assert!(roster.all_dead(Faction::Ally));
        assert!(!roster.all_dead(Faction::Enemy));
        assert_eq!(roster.living().count(), 1);
    }
}
