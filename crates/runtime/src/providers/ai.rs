//! Random move selection for AI-controlled combatants.

use async_trait::async_trait;
use battle_core::{BattleEntity, Roster, SkillOracle, require_candidates};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::api::{MoveChoice, MoveProvider, Result, SelectionContext};
use crate::oracle::BattleCatalog;

/// How [`RandomAi`] builds the pool of targets it picks from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetPolicy {
    /// Only targets the chosen skill's target group allows. Skills with no
    /// eligible target are passed over; when none are left the actor skips.
    #[default]
    SkillGroup,
    /// Any member of the opposing faction, dead or alive, whatever the skill's
    /// target group says. Moves that the group forbids are refused by the engine.
    OpposingFaction,
}

/// Picks a uniformly random skill from the actor's skillset and a uniformly
/// random target from the pool described by `policy`.
///
/// Returns `None` when the actor knows no usable skill or the pool is empty.
pub fn choose_random_move(
    actor: &BattleEntity,
    roster: &Roster,
    catalog: &BattleCatalog,
    policy: TargetPolicy,
    rng: &mut impl Rng,
) -> Option<MoveChoice> {
    match policy {
        TargetPolicy::SkillGroup => {
            let usable: Vec<(&String, Vec<&BattleEntity>)> = actor
                .skillset
                .iter()
                .filter_map(|skill| {
                    let group = catalog.skills().skill(skill)?.stats.target_group;
                    match require_candidates(group, actor, roster) {
                        Ok(pool) => Some((skill, pool)),
                        Err(err) => {
                            tracing::debug!(actor = %actor, skill = %skill, "{err}");
                            None
                        }
                    }
                })
                .collect();

            let (skill, pool) = usable.choose(rng)?;
            let target = pool.choose(rng)?;
            Some(MoveChoice::new(*skill, target.id))
        }
        TargetPolicy::OpposingFaction => {
            let skill = actor.skillset.choose(rng)?;
            let pool: Vec<&BattleEntity> = roster.faction(actor.faction.opponent()).collect();
            let target = pool.choose(rng)?;
            Some(MoveChoice::new(skill.clone(), target.id))
        }
    }
}

/// Seeded random AI.
///
/// The generator lives behind a mutex so one provider can serve every actor of
/// a faction; the runtime asks for moves one actor at a time.
#[derive(Debug)]
pub struct RandomAi {
    rng: Mutex<StdRng>,
    policy: TargetPolicy,
}

impl RandomAi {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            policy: TargetPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TargetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> TargetPolicy {
        self.policy
    }
}

#[async_trait]
impl MoveProvider for RandomAi {
    async fn select_move(&self, ctx: &SelectionContext) -> Result<Option<MoveChoice>> {
        let Some(actor) = ctx.actor_entity() else {
            return Ok(None);
        };

        let mut rng = self.rng.lock().await;
        let choice = choose_random_move(actor, &ctx.roster, &ctx.catalog, self.policy, &mut *rng);

        tracing::debug!(actor = %actor, choice = ?choice, "AI picked a move");
        Ok(choice)
    }
}

/// Wraps a plain function as a move provider.
///
/// Useful for custom policies that need no async work.
pub struct FnProvider<F> {
    choose: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&SelectionContext) -> Option<MoveChoice> + Send + Sync,
{
    pub fn new(choose: F) -> Self {
        Self { choose }
    }
}

#[async_trait]
impl<F> MoveProvider for FnProvider<F>
where
    F: Fn(&SelectionContext) -> Option<MoveChoice> + Send + Sync,
{
    async fn select_move(&self, ctx: &SelectionContext) -> Result<Option<MoveChoice>> {
        Ok((self.choose)(ctx))
    }
}
