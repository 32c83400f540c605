use super::EntityId;

/// A move chosen for one round: `source` uses `skill` on `target`.
///
/// Intents are created fresh during move selection and cleared after the round
/// is resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveIntent {
    pub source: EntityId,
    pub skill: String,
    pub target: EntityId,
}

impl MoveIntent {
    pub fn new(source: EntityId, skill: impl Into<String>, target: EntityId) -> Self {
        Self {
            source,
            skill: skill.into(),
            target,
        }
    }
}
