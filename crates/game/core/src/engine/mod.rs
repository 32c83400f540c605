//! Battle state machine.
//!
//! The [`BattleEngine`] is the authoritative owner of a battle's roster. It
//! walks the round cycle
//!
//! ```text
//! AwaitingMoves -> Resolving -> CheckEnd -> (AwaitingMoves | Terminal)
//! ```
//!
//! and records every observable change as a [`BattleEvent`]. Move selection is
//! not its concern: hosts collect intents however they like (AI, scripts,
//! players) and submit them while the engine is awaiting moves.

mod errors;
pub mod turns;

pub use errors::MoveError;
pub use turns::{turn_order, weighted_order};

use std::collections::BTreeMap;

use crate::combat::{Resolution, resolve_move};
use crate::config::{BattleConfig, TurnOrderPolicy};
use crate::env::{BattleEnv, ConfigError, RngOracle};
use crate::events::BattleEvent;
use crate::state::{BattleEntity, EntityId, Faction, MoveIntent, Roster};
use crate::stats::{SkillDefinition, SkillStats};

/// How a finished battle ended, from the allies' point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Won,
    Lost,
}

/// Current step of the round cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    AwaitingMoves,
    Resolving,
    CheckEnd,
    Terminal(BattleOutcome),
}

/// Synchronous battle state machine.
///
/// The engine holds no RNG of its own. Every call that needs randomness takes
/// one, which keeps the engine `Clone` and makes replays a matter of passing
/// the same seeded source.
#[derive(Clone, Debug)]
pub struct BattleEngine {
    roster: Roster,
    config: BattleConfig,
    phase: BattlePhase,
    round: u32,
    round_open: bool,
    order: Vec<EntityId>,
    intents: BTreeMap<EntityId, MoveIntent>,
    events: Vec<BattleEvent>,
}

impl BattleEngine {
    /// Creates an engine and draws the initial turn order.
    ///
    /// Fails if either faction has no combatants.
    pub fn new(
        roster: Roster,
        config: BattleConfig,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<Self, ConfigError> {
        for faction in [Faction::Ally, Faction::Enemy] {
            if roster.count(faction) == 0 {
                return Err(ConfigError::NoCombatants { faction });
            }
        }

        let order = turn_order(roster.iter(), rng);
        Ok(Self {
            roster,
            config,
            phase: BattlePhase::AwaitingMoves,
            round: 0,
            round_open: false,
            order,
            intents: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    // ===== accessors =====

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Number of the current (or last started) round; 0 before the first round.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Resolution order. Dead entities stay in it and are skipped.
    pub fn turn_order(&self) -> &[EntityId] {
        &self.order
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn intent(&self, source: EntityId) -> Option<&MoveIntent> {
        self.intents.get(&source)
    }

    pub fn intents(&self) -> impl Iterator<Item = &MoveIntent> {
        self.intents.values()
    }

    /// Living entities that still need a move this round, in turn order.
    pub fn pending_actors(&self) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| !self.intents.contains_key(id))
            .filter(|id| self.roster.get(*id).is_some_and(BattleEntity::is_alive))
            .collect()
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== AwaitingMoves =====

    /// Opens the next round and returns its number.
    ///
    /// Calling it again before the round is resolved is a no-op that returns
    /// the same number.
    pub fn begin_round(&mut self) -> Result<u32, MoveError> {
        self.expect_phase(BattlePhase::AwaitingMoves, "begin_round")?;
        if !self.round_open {
            self.round += 1;
            self.round_open = true;
            self.events.push(BattleEvent::RoundStarted { round: self.round });
        }
        Ok(self.round)
    }

    /// Checks an intent against the roster and catalogs without recording it.
    ///
    /// Returns the skill definition the intent resolved to.
    pub fn validate_intent<'e>(
        &self,
        env: &BattleEnv<'e>,
        intent: &MoveIntent,
    ) -> Result<&'e SkillDefinition, MoveError> {
        let source = self
            .roster
            .get(intent.source)
            .ok_or(MoveError::UnknownEntity(intent.source))?;
        if source.is_dead() {
            return Err(MoveError::SourceDead(source.id));
        }
        if !source.has_skill(&intent.skill) {
            return Err(MoveError::SkillNotInSkillset {
                entity: source.id,
                skill: intent.skill.clone(),
            });
        }
        let skill = env
            .skills()
            .skill(&intent.skill)
            .ok_or_else(|| MoveError::UnknownSkill(intent.skill.clone()))?;

        let target = self
            .roster
            .get(intent.target)
            .ok_or(MoveError::UnknownEntity(intent.target))?;
        let group = skill.stats.target_group;
        if !group.eligible(source, target) {
            return Err(MoveError::InvalidTarget {
                actor: source.id,
                target: target.id,
                group,
            });
        }
        Ok(skill)
    }

    /// Validates and records an intent, replacing any earlier one for the same source.
    ///
    /// Opens the round first if [`BattleEngine::begin_round`] was not called.
    pub fn submit_intent(&mut self, env: &BattleEnv<'_>, intent: MoveIntent) -> Result<(), MoveError> {
        self.expect_phase(BattlePhase::AwaitingMoves, "submit_intent")?;
        self.validate_intent(env, &intent)?;
        self.begin_round()?;

        self.events.push(BattleEvent::MoveChosen {
            source: intent.source,
            skill: intent.skill.clone(),
            target: intent.target,
        });
        self.intents.insert(intent.source, intent);
        Ok(())
    }

    pub fn clear_intents(&mut self) {
        self.intents.clear();
    }

    // ===== Resolving =====

    /// Resolves every recorded intent in turn order.
    ///
    /// Entities that are dead when their turn comes, or that have no intent,
    /// are skipped. Effects are applied immediately, so later moves see them.
    /// Leaves the engine in [`BattlePhase::CheckEnd`].
    ///
    /// Every intent's skill is looked up before anything is applied. If one is
    /// missing from `env` the roster is untouched and the engine keeps awaiting
    /// moves.
    pub fn resolve_round(
        &mut self,
        env: &BattleEnv<'_>,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<Vec<Resolution>, MoveError> {
        self.expect_phase(BattlePhase::AwaitingMoves, "resolve_round")?;
        let skills = self
            .intents
            .values()
            .map(|intent| {
                env.skills()
                    .require_skill(&intent.skill)
                    .map(|skill| (intent.source, skill.stats))
                    .map_err(|_| MoveError::UnknownSkill(intent.skill.clone()))
            })
            .collect::<Result<BTreeMap<EntityId, SkillStats>, _>>()?;

        self.begin_round()?;
        self.phase = BattlePhase::Resolving;

        if self.config.turn_order == TurnOrderPolicy::EveryRound && self.round > 1 {
            self.order = turn_order(self.roster.living(), rng);
        }

        let mut resolutions = Vec::new();
        let mut failure = None;
        for id in self.order.clone() {
            let (Some(intent), Some(skill)) = (self.intents.get(&id), skills.get(&id)) else {
                continue;
            };
            if self.roster.get(id).is_none_or(BattleEntity::is_dead) {
                continue;
            }

            match resolve_move(&mut self.roster, intent, skill, rng, &self.config) {
                Ok(resolution) => {
                    self.events.extend(resolution.events());
                    resolutions.push(resolution);
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        // Moves already applied stay applied; the round still goes to CheckEnd.
        self.phase = BattlePhase::CheckEnd;
        match failure {
            Some(err) => Err(err),
            None => Ok(resolutions),
        }
    }

    // ===== CheckEnd =====

    /// Checks terminal conditions after a resolved round.
    ///
    /// Allies are checked first, so a round that wipes out both sides is a loss.
    /// On a non-terminal round the intents are cleared and the engine awaits
    /// moves for the next round.
    pub fn check_end(&mut self) -> Result<Option<BattleOutcome>, MoveError> {
        self.expect_phase(BattlePhase::CheckEnd, "check_end")?;

        let outcome = if self.roster.all_dead(Faction::Ally) {
            self.events.push(BattleEvent::BattleLost { round: self.round });
            Some(BattleOutcome::Lost)
        } else if self.roster.all_dead(Faction::Enemy) {
            self.events.push(BattleEvent::BattleWon { round: self.round });
            Some(BattleOutcome::Won)
        } else {
            None
        };

        self.clear_intents();
        self.round_open = false;
        self.phase = match outcome {
            Some(outcome) => BattlePhase::Terminal(outcome),
            None => BattlePhase::AwaitingMoves,
        };
        Ok(outcome)
    }

    fn expect_phase(&self, expected: BattlePhase, operation: &'static str) -> Result<(), MoveError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(MoveError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CatalogSnapshot, SequenceRng};
    use crate::stats::{DamageType, EntityStats};
    use crate::targeting::TargetGroup;

    const KNIGHT: EntityId = EntityId(0);
    const CLERIC: EntityId = EntityId(1);
    const GOBLIN: EntityId = EntityId(2);

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(
            vec![
                SkillDefinition::new(
                    "Slash",
                    SkillStats::new(DamageType::PHYSICAL, 1.0, TargetGroup::Enemies),
                ),
                SkillDefinition::new(
                    "Mend",
                    SkillStats::new(DamageType::HOLY, -5.0, TargetGroup::AllButDead),
                ),
            ],
            Vec::new(),
        )
    }

    fn roster(goblin_strength: f32) -> Roster {
        [
            BattleEntity::new(
                KNIGHT,
                "Knight",
                Faction::Ally,
                EntityStats::new(20.0, 0.0).with_physical(10.0, 0.0),
                vec!["Slash".into()],
            ),
            BattleEntity::new(
                CLERIC,
                "Cleric",
                Faction::Ally,
                EntityStats::new(10.0, 0.0),
                vec!["Mend".into()],
            ),
            BattleEntity::new(
                GOBLIN,
                "Goblin",
                Faction::Enemy,
                EntityStats::new(15.0, 0.0).with_physical(goblin_strength, 0.0),
                vec!["Slash".into()],
            ),
        ]
        .into_iter()
        .collect()
    }

    fn engine(goblin_strength: f32) -> BattleEngine {
        // Zero speeds keep roster order: Knight, Cleric, Goblin.
        BattleEngine::new(
            roster(goblin_strength),
            BattleConfig::default(),
            &mut SequenceRng::new(vec![0.9]),
        )
        .unwrap()
    }

    #[test]
    fn empty_faction_cannot_start() {
        let roster: Roster = roster(1.0)
            .iter()
            .filter(|e| e.faction == Faction::Ally)
            .cloned()
            .collect();
        let err = BattleEngine::new(roster, BattleConfig::default(), &mut SequenceRng::new(vec![0.0]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NoCombatants {
                faction: Faction::Enemy
            }
        );
    }

    #[test]
    fn intents_are_validated() {
        let catalog = catalog();
        let env = BattleEnv::from_catalog(&catalog);
        let mut engine = engine(1.0);
        engine.begin_round().unwrap();

        assert!(matches!(
            engine.submit_intent(&env, MoveIntent::new(KNIGHT, "Mend", KNIGHT)),
            Err(MoveError::SkillNotInSkillset { .. })
        ));
        assert!(matches!(
            engine.submit_intent(&env, MoveIntent::new(KNIGHT, "Slash", CLERIC)),
            Err(MoveError::InvalidTarget { .. })
        ));
        assert_eq!(
            engine.submit_intent(&env, MoveIntent::new(KNIGHT, "Slash", EntityId(9))),
            Err(MoveError::UnknownEntity(EntityId(9)))
        );
        assert!(
            engine
                .submit_intent(&env, MoveIntent::new(KNIGHT, "Slash", GOBLIN))
                .is_ok()
        );
        assert_eq!(engine.pending_actors(), vec![CLERIC, GOBLIN]);
    }

    #[test]
    fn moves_resolve_in_order_and_effects_are_visible() {
        let catalog = catalog();
        let env = BattleEnv::from_catalog(&catalog);
        let mut engine = engine(15.0);
        let mut rng = SequenceRng::new(vec![0.9]);

        engine.begin_round().unwrap();
        engine
            .submit_intent(&env, MoveIntent::new(KNIGHT, "Slash", GOBLIN))
            .unwrap();
        engine
            .submit_intent(&env, MoveIntent::new(CLERIC, "Mend", KNIGHT))
            .unwrap();
        engine
            .submit_intent(&env, MoveIntent::new(GOBLIN, "Slash", KNIGHT))
            .unwrap();

        let resolutions = engine.resolve_round(&env, &mut rng).unwrap();
        let sources: Vec<_> = resolutions.iter().map(|r| r.source).collect();
        assert_eq!(sources, vec![KNIGHT, CLERIC, GOBLIN]);

        // Knight was at full health when healed, then took 15.
        assert_eq!(engine.roster().get(KNIGHT).unwrap().health(), 5.0);
        assert_eq!(engine.roster().get(GOBLIN).unwrap().health(), 5.0);
        assert_eq!(engine.check_end().unwrap(), None);
        assert_eq!(engine.phase(), BattlePhase::AwaitingMoves);
        assert_eq!(engine.intents().count(), 0);
    }

    #[test]
    fn dead_entities_are_skipped() {
        let catalog = catalog();
        let env = BattleEnv::from_catalog(&catalog);
        let mut engine = engine(15.0);
        let mut rng = SequenceRng::new(vec![0.9]);

        // Knight hits twice over two rounds; the second round kills the goblin
        // before it acts.
        for _ in 0..2 {
            engine.begin_round().unwrap();
            engine
                .submit_intent(&env, MoveIntent::new(KNIGHT, "Slash", GOBLIN))
                .unwrap();
            engine
                .submit_intent(&env, MoveIntent::new(GOBLIN, "Slash", CLERIC))
                .unwrap();
            engine.resolve_round(&env, &mut rng).unwrap();
            if engine.check_end().unwrap().is_some() {
                break;
            }
        }

        assert_eq!(engine.outcome(), Some(BattleOutcome::Won));
        assert_eq!(engine.round(), 2);
        // Only the first-round goblin hit landed (cleric capped at 0 from 10).
        assert_eq!(engine.roster().get(CLERIC).unwrap().health(), 0.0);
    }

    #[test]
    fn battle_lost_is_emitted_once_and_engine_stops() {
        let catalog = catalog();
        let env = BattleEnv::from_catalog(&catalog);
        let mut engine = engine(100.0);
        let mut rng = SequenceRng::new(vec![0.9]);

        engine.roster.get_mut(CLERIC).unwrap().set_health(0.0);
        engine.begin_round().unwrap();
        engine
            .submit_intent(&env, MoveIntent::new(GOBLIN, "Slash", KNIGHT))
            .unwrap();
        engine.resolve_round(&env, &mut rng).unwrap();
        assert_eq!(engine.check_end().unwrap(), Some(BattleOutcome::Lost));

        assert!(matches!(
            engine.begin_round(),
            Err(MoveError::WrongPhase { .. })
        ));
        assert!(matches!(
            engine.check_end(),
            Err(MoveError::WrongPhase { .. })
        ));

        let lost = engine
            .drain_events()
            .iter()
            .filter(|e| matches!(e, BattleEvent::BattleLost { .. }))
            .count();
        assert_eq!(lost, 1);
    }

    #[test]
    fn round_events_are_ordered() {
        let catalog = catalog();
        let env = BattleEnv::from_catalog(&catalog);
        let mut engine = engine(1.0);
        let mut rng = SequenceRng::new(vec![0.9]);

        engine
            .submit_intent(&env, MoveIntent::new(KNIGHT, "Slash", GOBLIN))
            .unwrap();
        engine.resolve_round(&env, &mut rng).unwrap();
        engine.check_end().unwrap();

        let kinds: Vec<_> = engine.drain_events().iter().map(BattleEvent::kind).collect();
        assert_eq!(
            kinds,
            vec!["round_started", "move_chosen", "damage_resolved", "resource_spent"]
        );
    }

    #[test]
    fn every_round_policy_redraws_order() {
        let catalog = catalog();
        let env = BattleEnv::from_catalog(&catalog);
        let mut roster = roster(1.0);
        for id in [KNIGHT, CLERIC, GOBLIN] {
            roster.get_mut(id).unwrap().stats.speed = 1.0;
        }
        let config = BattleConfig::default().with_turn_order(TurnOrderPolicy::EveryRound);
        // First draws pick the first remaining entity each time.
        let mut engine = BattleEngine::new(roster, config, &mut SequenceRng::new(vec![0.0])).unwrap();
        assert_eq!(engine.turn_order(), &[KNIGHT, CLERIC, GOBLIN]);

        // Round 1 keeps the initial order; round 2 redraws with high rolls.
        let mut rng = SequenceRng::new(vec![0.99]);
        engine.resolve_round(&env, &mut rng).unwrap();
        engine.check_end().unwrap();
        assert_eq!(engine.turn_order(), &[KNIGHT, CLERIC, GOBLIN]);

        engine.resolve_round(&env, &mut rng).unwrap();
        assert_eq!(engine.turn_order(), &[GOBLIN, CLERIC, KNIGHT]);
    }

    #[test]
    fn missing_skill_leaves_the_round_open() {
        let catalog = catalog();
        let env = BattleEnv::from_catalog(&catalog);
        let empty = CatalogSnapshot::new(Vec::new(), Vec::new());
        let stale = BattleEnv::from_catalog(&empty);
        let mut engine = engine(1.0);
        let mut rng = SequenceRng::new(vec![0.9]);

        engine
            .submit_intent(&env, MoveIntent::new(KNIGHT, "Slash", GOBLIN))
            .unwrap();
        assert_eq!(
            engine.resolve_round(&stale, &mut rng),
            Err(MoveError::UnknownSkill("Slash".into()))
        );
        assert_eq!(engine.phase(), BattlePhase::AwaitingMoves);
        assert_eq!(engine.roster().get(GOBLIN).unwrap().health(), 15.0);
        assert_eq!(rng.consumed(), 0);

        let resolutions = engine.resolve_round(&env, &mut rng).unwrap();
        assert_eq!(resolutions.len(), 1);
        assert_eq!(engine.round(), 1);
        assert_eq!(engine.check_end().unwrap(), None);
    }
}
