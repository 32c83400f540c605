//! Targeting policy for skills.
//!
//! A skill's [`TargetGroup`] decides which combatants it may be aimed at,
//! relative to the acting entity. Eligibility is a pure function of the group,
//! the actor and the candidate; it never looks at the rest of the roster.

use core::str::FromStr;

use crate::error::{BattleError, ErrorSeverity};
use crate::state::{BattleEntity, Roster};

/// Named eligibility rule restricting which entities a skill may target.
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
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TargetGroup {
    AllButSelfAndDead = 0,
    AllButDead = 1,
    AllButSelf = 2,
    AllDead = 3,
    All = 4,
    Enemies = 5,
    Allies = 6,
}

/// Errors raised when a target group or target set cannot be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    #[error("unknown target group tag {0}")]
    UnknownGroupTag(u8),

    #[error("unknown target group '{0}'")]
    UnknownGroupName(String),

    #[error("no eligible target for group {group}")]
    NoEligibleTarget { group: TargetGroup },
}

impl BattleError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownGroupTag(_) | Self::UnknownGroupName(_) => ErrorSeverity::Validation,
            Self::NoEligibleTarget { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownGroupTag(_) => "TARGETING_UNKNOWN_GROUP_TAG",
            Self::UnknownGroupName(_) => "TARGETING_UNKNOWN_GROUP_NAME",
            Self::NoEligibleTarget { .. } => "TARGETING_NO_ELIGIBLE_TARGET",
        }
    }
}

impl TargetGroup {
    /// Returns true if `candidate` may be targeted by `actor` under this group.
    pub fn eligible(self, actor: &BattleEntity, candidate: &BattleEntity) -> bool {
        let is_self = actor.id == candidate.id;
        match self {
            Self::All => true,
            Self::AllButSelf => !is_self,
            Self::Enemies => candidate.faction != actor.faction,
            Self::Allies => candidate.faction == actor.faction,
            Self::AllButSelfAndDead => !is_self && !candidate.is_dead(),
            Self::AllButDead => !candidate.is_dead(),
            Self::AllDead => candidate.is_dead(),
        }
    }

    /// Parses a group by name, reporting unknown names as a targeting error.
    pub fn parse(name: &str) -> Result<Self, TargetingError> {
        Self::from_str(name).map_err(|_| TargetingError::UnknownGroupName(name.to_owned()))
    }
}

impl TryFrom<u8> for TargetGroup {
    type Error = TargetingError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Ok(match tag {
            0 => Self::AllButSelfAndDead,
            1 => Self::AllButDead,
            2 => Self::AllButSelf,
            3 => Self::AllDead,
            4 => Self::All,
            5 => Self::Enemies,
            6 => Self::Allies,
            other => return Err(TargetingError::UnknownGroupTag(other)),
        })
    }
}

/// Iterates over every roster member `actor` may target with `group`, in roster order.
pub fn candidates<'a>(
    group: TargetGroup,
    actor: &'a BattleEntity,
    roster: &'a Roster,
) -> impl Iterator<Item = &'a BattleEntity> + 'a {
    roster.iter().filter(move |c| group.eligible(actor, c))
}

/// Collects the [`candidates`] for `group`, reporting an empty set as
/// [`TargetingError::NoEligibleTarget`].
pub fn require_candidates<'a>(
    group: TargetGroup,
    actor: &'a BattleEntity,
    roster: &'a Roster,
) -> Result<Vec<&'a BattleEntity>, TargetingError> {
    let pool: Vec<_> = candidates(group, actor, roster).collect();
    if pool.is_empty() {
        return Err(TargetingError::NoEligibleTarget { group });
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, Faction};
    use crate::stats::EntityStats;
    use strum::IntoEnumIterator;

    fn entity(id: u32, faction: Faction, health: f32) -> BattleEntity {
        BattleEntity::new(
            EntityId(id),
            format!("e{id}"),
            faction,
            EntityStats::new(10.0, 0.0),
            Vec::new(),
        )
        .with_health(health)
    }

    #[test]
    fn enemies_group_checks_faction() {
        let actor = entity(0, Faction::Ally, 10.0);
        let ally = entity(1, Faction::Ally, 10.0);
        let enemy = entity(2, Faction::Enemy, 10.0);

        assert!(!TargetGroup::Enemies.eligible(&actor, &ally));
        assert!(TargetGroup::Enemies.eligible(&actor, &enemy));
        assert!(TargetGroup::Allies.eligible(&actor, &ally));
        assert!(TargetGroup::Allies.eligible(&actor, &actor));
    }

    #[test]
    fn self_and_dead_rules() {
        let actor = entity(0, Faction::Ally, 10.0);
        let corpse = entity(1, Faction::Enemy, 0.0);
        let living = entity(2, Faction::Enemy, 4.0);

        assert!(TargetGroup::All.eligible(&actor, &actor));
        assert!(!TargetGroup::AllButSelf.eligible(&actor, &actor));
        assert!(TargetGroup::AllButSelf.eligible(&actor, &corpse));
        assert!(!TargetGroup::AllButSelfAndDead.eligible(&actor, &actor));
        assert!(!TargetGroup::AllButSelfAndDead.eligible(&actor, &corpse));
        assert!(TargetGroup::AllButSelfAndDead.eligible(&actor, &living));
        assert!(TargetGroup::AllButDead.eligible(&actor, &actor));
        assert!(!TargetGroup::AllButDead.eligible(&actor, &corpse));
        assert!(TargetGroup::AllDead.eligible(&actor, &corpse));
        assert!(!TargetGroup::AllDead.eligible(&actor, &living));
    }

    #[test]
    fn unknown_groups_are_rejected() {
        assert_eq!(
            TargetGroup::try_from(42),
            Err(TargetingError::UnknownGroupTag(42))
        );
        assert_eq!(
            TargetGroup::parse("Everyone"),
            Err(TargetingError::UnknownGroupName("Everyone".into()))
        );
        assert_eq!(TargetGroup::parse("Enemies"), Ok(TargetGroup::Enemies));
    }

    #[test]
    fn tags_round_trip_through_repr() {
        for group in TargetGroup::iter() {
            assert_eq!(TargetGroup::try_from(group as u8), Ok(group));
        }
    }

    #[test]
    fn candidates_filters_roster() {
        let roster: Roster = [
            entity(0, Faction::Ally, 10.0),
            entity(1, Faction::Enemy, 10.0),
            entity(2, Faction::Enemy, 0.0),
        ]
        .into_iter()
        .collect();
        let actor = roster.get(EntityId(0)).unwrap();

        let ids: Vec<_> = candidates(TargetGroup::AllButSelfAndDead, actor, &roster)
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![EntityId(1)]);
    }

    #[test]
    fn empty_candidate_set_is_reported() {
        let roster: Roster = [entity(0, Faction::Ally, 10.0), entity(1, Faction::Enemy, 10.0)]
            .into_iter()
            .collect();
        let actor = roster.get(EntityId(0)).unwrap();

        let pool = require_candidates(TargetGroup::Enemies, actor, &roster).unwrap();
        assert_eq!(pool.iter().map(|e| e.id).collect::<Vec<_>>(), vec![EntityId(1)]);

        let err = require_candidates(TargetGroup::AllDead, actor, &roster).unwrap_err();
        assert_eq!(
            err,
            TargetingError::NoEligibleTarget {
                group: TargetGroup::AllDead
            }
        );
        assert!(err.severity().is_recoverable());
    }
}
