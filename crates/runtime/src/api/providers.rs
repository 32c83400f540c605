//! Asynchronous abstraction for sourcing moves.
//!
//! Runtime users plug in [`MoveProvider`] implementations so a battle can run
//! with human input, scripted fixtures, or AI policies.
use async_trait::async_trait;
use battle_core::{BattleEntity, EntityId, MoveError, MoveIntent, Roster, SkillDefinition};

use super::errors::{ProviderKind, Result};
use crate::oracle::BattleCatalog;

/// A move picked by a provider: the skill to use and who to use it on.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveChoice {
    pub skill: String,
    pub target: EntityId,
}

impl MoveChoice {
    pub fn new(skill: impl Into<String>, target: EntityId) -> Self {
        Self {
            skill: skill.into(),
            target,
        }
    }

    pub fn into_intent(self, source: EntityId) -> MoveIntent {
        MoveIntent::new(source, self.skill, self.target)
    }
}

/// Everything a provider may look at when choosing a move.
///
/// The roster is a snapshot taken when the actor was asked to choose; it does
/// not change while the provider is thinking.
#[derive(Clone, Debug)]
pub struct SelectionContext {
    pub actor: EntityId,
    pub round: u32,
    pub roster: Roster,
    pub catalog: BattleCatalog,
    /// Why the previous choice for this actor was refused, if it was.
    pub rejection: Option<MoveError>,
}

impl SelectionContext {
    pub fn actor_entity(&self) -> Option<&BattleEntity> {
        self.roster.get(self.actor)
    }

    /// Skill definitions the actor can use, in skillset order.
    pub fn available_skills(&self) -> Vec<&SkillDefinition> {
        self.actor_entity()
            .map(|actor| {
                actor
                    .skillset
                    .iter()
                    .filter_map(|name| self.catalog.skill(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Roster entries the skill's target group allows for this actor.
    pub fn eligible_targets(&self, skill: &str) -> Vec<&BattleEntity> {
        let (Some(actor), Some(skill)) = (self.actor_entity(), self.catalog.skill(skill)) else {
            return Vec::new();
        };
        battle_core::candidates(skill.stats.target_group, actor, &self.roster).collect()
    }
}

/// Trait for providing moves for the entity whose turn it is to choose.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI decisions
/// - Scripted/replayed moves
/// - Testing fixtures
///
/// Returning `Ok(None)` means the actor has nothing to do this round; the
/// runtime logs it and moves on.
#[async_trait]
pub trait MoveProvider: Send + Sync {
    async fn select_move(&self, ctx: &SelectionContext) -> Result<Option<MoveChoice>>;

    /// Decides how the runtime treats moves this provider gets wrong.
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ai
    }
}

#[async_trait]
impl<P: MoveProvider + ?Sized> MoveProvider for Box<P> {
    async fn select_move(&self, ctx: &SelectionContext) -> Result<Option<MoveChoice>> {
        (**self).select_move(ctx).await
    }

    fn kind(&self) -> ProviderKind {
        (**self).kind()
    }
}
