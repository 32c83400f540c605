//! Pre-recorded moves for tests and replays.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use battle_core::EntityId;
use tokio::sync::Mutex;

use crate::api::{MoveChoice, MoveProvider, ProviderKind, Result, SelectionContext};

/// Plays back queued moves per actor, in order.
///
/// An actor with an empty queue skips its turn. The provider can pose as a
/// player so tests can exercise the re-prompt path.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    queues: Mutex<HashMap<EntityId, VecDeque<MoveChoice>>>,
    kind: Option<ProviderKind>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `moves` for `actor` after anything already queued.
    #[must_use]
    pub fn with_moves(
        mut self,
        actor: EntityId,
        moves: impl IntoIterator<Item = MoveChoice>,
    ) -> Self {
        self.queues.get_mut().entry(actor).or_default().extend(moves);
        self
    }

    /// Reports this provider as `kind` to the runtime.
    #[must_use]
    pub fn acting_as(mut self, kind: ProviderKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Queues more moves while the provider is in use.
    pub async fn push(&self, actor: EntityId, choice: MoveChoice) {
        self.queues
            .lock()
            .await
            .entry(actor)
            .or_default()
            .push_back(choice);
    }

    /// Moves still queued for `actor`.
    pub async fn remaining(&self, actor: EntityId) -> usize {
        self.queues
            .lock()
            .await
            .get(&actor)
            .map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl MoveProvider for ScriptedProvider {
    async fn select_move(&self, ctx: &SelectionContext) -> Result<Option<MoveChoice>> {
        let mut queues = self.queues.lock().await;
        Ok(queues.get_mut(&ctx.actor).and_then(VecDeque::pop_front))
    }

    fn kind(&self) -> ProviderKind {
        self.kind.unwrap_or(ProviderKind::Ai)
    }
}
