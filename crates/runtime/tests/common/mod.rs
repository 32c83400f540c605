#![allow(dead_code)]

use battle_core::{
    Arena, DamageType, EntityDefinition, EntityId, EntityStats, Faction, Region,
    SkillDefinition, SkillStats, TargetGroup,
};
use battle_runtime::{BattleCatalog, BattleContext};

pub const KNIGHT: EntityId = EntityId(0);
pub const GOBLIN: EntityId = EntityId(1);

/// Knight (30 hp, Slash for 10) against Goblin (15 hp, Slash for 4).
/// Nobody dodges or crits, so every hit lands for its base damage.
pub fn catalog() -> BattleCatalog {
    let skills = [
        SkillDefinition::new(
            "Slash",
            SkillStats::new(DamageType::PHYSICAL, 1.0, TargetGroup::Enemies),
        ),
        SkillDefinition::new(
            "Mend",
            SkillStats::new(DamageType::HOLY, -5.0, TargetGroup::AllButDead).with_cost(2.0),
        ),
    ];
    let entities = [
        EntityDefinition::new(
            "Knight",
            EntityStats::new(30.0, 10.0)
                .with_physical(10.0, 0.0)
                .with_speed(2.0),
            vec!["Slash".into(), "Mend".into()],
        ),
        EntityDefinition::new(
            "Goblin",
            EntityStats::new(15.0, 0.0)
                .with_physical(4.0, 0.0)
                .with_speed(1.0),
            vec!["Slash".into()],
        )
        .with_location(Region::DESERT, "pit"),
    ];
    BattleCatalog::from_definitions(skills, entities, Vec::new()).unwrap()
}

pub fn arena() -> Arena {
    let mut arena = Arena::new("Pit", Region::DESERT, "pit");
    arena.add_slot(0, Faction::Ally);
    arena.add_slot(1, Faction::Ally);
    arena.add_slot(0, Faction::Enemy);
    arena.add_slot(1, Faction::Enemy);
    arena
}

/// One knight against one goblin, spawned in that order.
pub fn duel() -> BattleContext {
    let mut context = BattleContext::new(catalog(), arena()).unwrap();
    context.spawn("Knight", Faction::Ally).unwrap();
    context.spawn("Goblin", Faction::Enemy).unwrap();
    context
}
