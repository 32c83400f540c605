//! Channel bridge between the runtime and a human at some UI.
//!
//! The runtime side holds a [`PlayerProxy`]; the UI side holds the matching
//! [`PlayerInputHandle`] and answers one [`MoveRequest`] at a time. When the
//! battle is aborted while a request is outstanding, the runtime drops its end
//! of the reply channel and [`MoveRequest::is_cancelled`] turns true.

use async_trait::async_trait;
use battle_core::{EntityId, MoveError};
use tokio::sync::{mpsc, oneshot};

use crate::api::{
    MoveChoice, MoveProvider, ProviderKind, Result, RuntimeError, SelectionContext,
};

/// Creates a connected proxy/handle pair.
pub fn player_channel(buffer: usize) -> (PlayerProxy, PlayerInputHandle) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (
        PlayerProxy { requests: tx },
        PlayerInputHandle { requests: rx },
    )
}

/// A pending question to the player: what should this actor do?
#[derive(Debug)]
pub struct MoveRequest {
    context: SelectionContext,
    reply: oneshot::Sender<Option<MoveChoice>>,
}

impl MoveRequest {
    pub fn context(&self) -> &SelectionContext {
        &self.context
    }

    pub fn actor(&self) -> EntityId {
        self.context.actor
    }

    /// Why the previous answer for this actor was refused.
    pub fn rejection(&self) -> Option<&MoveError> {
        self.context.rejection.as_ref()
    }

    /// True once the runtime stopped waiting for this answer.
    pub fn is_cancelled(&self) -> bool {
        self.reply.is_closed()
    }

    /// Resolves once the runtime stops waiting for this answer.
    pub async fn cancelled(&mut self) {
        self.reply.closed().await;
    }

    /// Answers with a move. Returns false if the runtime stopped waiting.
    pub fn respond(self, choice: MoveChoice) -> bool {
        self.reply.send(Some(choice)).is_ok()
    }

    /// Lets the actor sit this round out. Returns false if the runtime stopped waiting.
    pub fn pass(self) -> bool {
        self.reply.send(None).is_ok()
    }
}

/// Move provider that forwards every request to a [`PlayerInputHandle`].
#[derive(Debug, Clone)]
pub struct PlayerProxy {
    requests: mpsc::Sender<MoveRequest>,
}

#[async_trait]
impl MoveProvider for PlayerProxy {
    async fn select_move(&self, ctx: &SelectionContext) -> Result<Option<MoveChoice>> {
        let (reply, answer) = oneshot::channel();
        self.requests
            .send(MoveRequest {
                context: ctx.clone(),
                reply,
            })
            .await
            .map_err(|_| RuntimeError::PlayerChannelClosed)?;

        answer.await.map_err(|_| RuntimeError::PlayerChannelClosed)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Player
    }
}

/// UI-side end of the player channel.
#[derive(Debug)]
pub struct PlayerInputHandle {
    requests: mpsc::Receiver<MoveRequest>,
}

impl PlayerInputHandle {
    /// Waits for the next request. `None` once the runtime side is gone.
    pub async fn next_request(&mut self) -> Option<MoveRequest> {
        self.requests.recv().await
    }
}
