//! Topic-based event bus implementation.

use battle_core::{BattleEvent, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round boundaries and move selection
    Round,
    /// Damage, healing, resource spending and deaths
    Combat,
    /// Victory or defeat
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Round, Topic::Combat, Topic::Outcome];
}

/// Event wrapper carrying either an engine event or a runtime notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Battle(BattleEvent),

    /// The actor's provider had nothing to do (no usable skill or no eligible target).
    MoveSkipped { actor: EntityId, round: u32 },

    /// A player's move failed validation and will be asked for again.
    MoveRejected {
        actor: EntityId,
        round: u32,
        reason: String,
    },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(event) => match event {
                BattleEvent::RoundStarted { .. } | BattleEvent::MoveChosen { .. } => Topic::Round,
                BattleEvent::DamageResolved { .. }
                | BattleEvent::Healed { .. }
                | BattleEvent::ResourceSpent { .. }
                | BattleEvent::EntityDied { .. } => Topic::Combat,
                BattleEvent::BattleWon { .. } | BattleEvent::BattleLost { .. } => Topic::Outcome,
            },
            Event::MoveSkipped { .. } | Event::MoveRejected { .. } => Topic::Round,
        }
    }
}

impl From<BattleEvent> for Event {
    fn from(event: BattleEvent) -> Self {
        Event::Battle(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front and never change,
/// so publishing never waits on a lock.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        // Every topic gets a channel in `with_capacity`.
        &self.channels[&topic]
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
