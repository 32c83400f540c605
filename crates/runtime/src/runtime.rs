//! High-level battle orchestrator.
//!
//! The runtime owns the engine, asks move providers for choices while the
//! engine awaits moves, and forwards engine events to the event bus. A
//! builder-based API lets clients plug in providers and configuration.

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use battle_core::{
    Arena, BattleConfig, BattleEngine, BattleEntity, BattleError, BattleOutcome, EntityId,
    ErrorSeverity, Faction, HealScaling, PcgRng, Roster, TurnOrderPolicy, compute_seed,
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::api::{MoveProvider, ProviderKind, Result, RuntimeError, SelectionContext};
use crate::context::BattleContext;
use crate::events::{Event, EventBus, Topic};
use crate::oracle::BattleCatalog;
use crate::providers::RandomAi;

/// Seed stream for dodge/crit rolls and turn-order draws.
const COMBAT_STREAM: u32 = 0xC0B7;
/// Seed stream for the default enemy AI.
const AI_STREAM: u32 = 0xA1;

/// Runtime configuration shared across the orchestrator and providers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    /// Battle seed. A random one is drawn at build time when unset.
    pub seed: Option<u64>,
    /// How many times a player is asked again after an invalid move.
    pub max_player_attempts: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            seed: None,
            max_player_attempts: 5,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `BATTLE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Applies `BATTLE_*` environment variables on top of `self`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Unset or unparsable values are ignored.
    ///
    /// Recognised keys: `BATTLE_SEED`, `BATTLE_EVENT_BUFFER`, `BATTLE_ROUND_LIMIT`
    /// (0 removes the limit), `BATTLE_TURN_ORDER`, `BATTLE_HEAL_SCALING` and
    /// `BATTLE_PLAYER_ATTEMPTS`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(seed) = read_var::<u64>(&lookup, "BATTLE_SEED") {
            self.seed = Some(seed);
        }
        if let Some(size) = read_var::<usize>(&lookup, "BATTLE_EVENT_BUFFER") {
            self.event_buffer_size = size.max(1);
        }
        if let Some(limit) = read_var::<u32>(&lookup, "BATTLE_ROUND_LIMIT") {
            self.battle.round_limit = (limit > 0).then_some(limit);
        }
        if let Some(order) = read_var::<TurnOrderPolicy>(&lookup, "BATTLE_TURN_ORDER") {
            self.battle.turn_order = order;
        }
        if let Some(scaling) = read_var::<HealScaling>(&lookup, "BATTLE_HEAL_SCALING") {
            self.battle.heal_scaling = scaling;
        }
        if let Some(attempts) = read_var::<u32>(&lookup, "BATTLE_PLAYER_ATTEMPTS") {
            self.max_player_attempts = attempts.max(1);
        }
        self
    }

    #[must_use]
    pub fn with_battle(mut self, battle: BattleConfig) -> Self {
        self.battle = battle;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn read_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key)?.trim().parse().ok()
}

/// Cloneable switch that stops a running battle.
///
/// Aborting while a provider is still choosing drops the pending request; a
/// player UI sees it as cancelled.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    flag: Arc<watch::Sender<bool>>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_aborted(&self) -> bool {
        *self.flag.borrow()
    }
}

/// Result of a battle that reached a terminal state.
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub rounds: u32,
    pub seed: u64,
    pub roster: Roster,
}

impl BattleReport {
    pub fn survivors(&self) -> impl Iterator<Item = &BattleEntity> {
        self.roster.living()
    }
}

/// Drives one battle from the first round to victory or defeat.
pub struct BattleRuntime {
    engine: BattleEngine,
    catalog: BattleCatalog,
    arena: Arena,
    rng: PcgRng,
    seed: u64,
    bus: EventBus,
    allies: Box<dyn MoveProvider>,
    enemies: Box<dyn MoveProvider>,
    config: RuntimeConfig,
    abort: AbortHandle,
    aborted: watch::Receiver<bool>,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Subscribe to one topic of the event stream
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn event_bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// Copy of the roster as it is right now.
    pub fn snapshot(&self) -> Roster {
        self.engine.roster().clone()
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn catalog(&self) -> &BattleCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs rounds until the battle ends.
    pub async fn run(&mut self) -> Result<BattleReport> {
        let roster = self.engine.roster();
        info!(
            seed = self.seed,
            arena = %self.arena.name,
            allies = roster.count(Faction::Ally),
            enemies = roster.count(Faction::Enemy),
            "battle started"
        );

        loop {
            if let Some(outcome) = self.run_round().await? {
                info!(%outcome, rounds = self.engine.round(), "battle finished");
                return Ok(BattleReport {
                    outcome,
                    rounds: self.engine.round(),
                    seed: self.seed,
                    roster: self.snapshot(),
                });
            }
        }
    }

    /// Runs a single round: collects a move from every living entity in turn
    /// order, resolves them, then checks for the end of the battle.
    ///
    /// Returns the outcome once the battle is over; calling it again after
    /// that returns the same outcome without doing anything.
    pub async fn run_round(&mut self) -> Result<Option<BattleOutcome>> {
        if let Some(outcome) = self.engine.outcome() {
            return Ok(Some(outcome));
        }
        if self.abort.is_aborted() {
            return Err(RuntimeError::Aborted {
                round: self.engine.round(),
            });
        }

        let round = self.engine.begin_round()?;
        publish_events(&mut self.engine, &self.bus);
        info!(round, "round started");

        for actor in self.engine.pending_actors() {
            self.collect_move(actor, round).await?;
        }

        let env = self.catalog.as_battle_env();
        let resolutions = self.engine.resolve_round(&env, &mut self.rng)?;
        for resolution in &resolutions {
            debug!(
                source = %resolution.source,
                target = %resolution.target,
                skill = %resolution.skill,
                outcome = ?resolution.outcome,
                died = resolution.target_died,
                "move resolved"
            );
        }

        let outcome = self.engine.check_end()?;
        publish_events(&mut self.engine, &self.bus);

        if outcome.is_none()
            && let Some(limit) = self.engine.config().round_limit
            && round >= limit
        {
            warn!(limit, "round limit reached without a winner");
            return Err(RuntimeError::RoundLimitReached { limit });
        }
        Ok(outcome)
    }

    /// Asks the actor's provider for a move until the engine accepts one.
    ///
    /// Players are asked again after a refused move, up to the configured
    /// number of attempts. A refused AI move ends the battle.
    async fn collect_move(&mut self, actor: EntityId, round: u32) -> Result<()> {
        let Some(faction) = self.engine.roster().get(actor).map(|e| e.faction) else {
            return Ok(());
        };
        let provider = match faction {
            Faction::Ally => &self.allies,
            Faction::Enemy => &self.enemies,
        };
        let kind = provider.kind();
        let attempts = match kind {
            ProviderKind::Player => self.config.max_player_attempts.max(1),
            ProviderKind::Ai => 1,
        };

        let mut aborted = self.aborted.clone();
        let mut rejection = None;
        let mut attempt = 0;
        loop {
            attempt += 1;
            let ctx = SelectionContext {
                actor,
                round,
                roster: self.engine.roster().clone(),
                catalog: self.catalog.clone(),
                rejection: rejection.take(),
            };

            let choice = tokio::select! {
                biased;
                _ = wait_for_abort(&mut aborted) => {
                    info!(%actor, round, "battle aborted while waiting for a move");
                    return Err(RuntimeError::Aborted { round });
                }
                choice = provider.select_move(&ctx) => choice?,
            };

            let Some(choice) = choice else {
                warn!(%actor, round, "no move available, skipping turn");
                self.bus.publish(Event::MoveSkipped { actor, round });
                return Ok(());
            };
            debug!(%actor, %kind, skill = %choice.skill, target = %choice.target, "move chosen");

            let env = self.catalog.as_battle_env();
            match self.engine.submit_intent(&env, choice.into_intent(actor)) {
                Ok(()) => {
                    publish_events(&mut self.engine, &self.bus);
                    return Ok(());
                }
                Err(err) if err.severity() == ErrorSeverity::Internal => return Err(err.into()),
                Err(err) if kind == ProviderKind::Ai => {
                    error!(%actor, code = err.error_code(), error = %err, "AI policy chose an invalid move");
                    return Err(RuntimeError::AiPolicy { actor, source: err });
                }
                Err(err) => {
                    warn!(%actor, attempt, error = %err, "player move rejected");
                    self.bus.publish(Event::MoveRejected {
                        actor,
                        round,
                        reason: err.to_string(),
                    });
                    if attempt >= attempts {
                        return Err(RuntimeError::AttemptsExhausted {
                            actor,
                            attempts,
                            source: err,
                        });
                    }
                    rejection = Some(err);
                }
            }
        }
    }
}

fn publish_events(engine: &mut BattleEngine, bus: &EventBus) {
    for event in engine.drain_events() {
        bus.publish(event);
    }
}

async fn wait_for_abort(aborted: &mut watch::Receiver<bool>) {
    let closed = aborted.wait_for(|flag| *flag).await.is_err();
    if closed {
        // The sender lives as long as the runtime, so this never resolves.
        std::future::pending::<()>().await;
    }
}

/// Builder for [`BattleRuntime`].
pub struct BattleRuntimeBuilder {
    config: RuntimeConfig,
    context: Option<BattleContext>,
    allies: Option<Box<dyn MoveProvider>>,
    enemies: Option<Box<dyn MoveProvider>>,
    bus: Option<EventBus>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            context: None,
            allies: None,
            enemies: None,
            bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the spawned battle context (required)
    pub fn context(mut self, context: BattleContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the provider for allied entities (required)
    pub fn ally_provider(mut self, provider: impl MoveProvider + 'static) -> Self {
        self.allies = Some(Box::new(provider));
        self
    }

    /// Set the provider for enemy entities (defaults to a seeded [`RandomAi`])
    pub fn enemy_provider(mut self, provider: impl MoveProvider + 'static) -> Self {
        self.enemies = Some(Box::new(provider));
        self
    }

    /// Publish to an existing bus instead of creating one
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Build the runtime and draw the initial turn order
    pub fn build(self) -> Result<BattleRuntime> {
        let context = self.context.ok_or(RuntimeError::MissingContext)?;
        let allies = self.allies.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Player,
        })?;

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let enemies = self.enemies.unwrap_or_else(|| {
            Box::new(RandomAi::new(compute_seed(seed, 0, 0, AI_STREAM)))
        });

        let (catalog, arena, roster) = context.into_parts();
        let mut rng = PcgRng::new(compute_seed(seed, 0, 0, COMBAT_STREAM));
        let engine = BattleEngine::new(roster, self.config.battle.clone(), &mut rng)?;
        debug!(order = ?engine.turn_order(), "turn order drawn");

        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));
        let (flag, aborted) = watch::channel(false);

        Ok(BattleRuntime {
            engine,
            catalog,
            arena,
            rng,
            seed,
            bus,
            allies,
            enemies,
            config: self.config,
            abort: AbortHandle {
                flag: Arc::new(flag),
            },
            aborted,
        })
    }
}
