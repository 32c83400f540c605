//! Arena battle simulator binary.
//!
//! This binary is the composition root that assembles:
//! 1. Content (skills, entities, arenas, rules) from a data directory
//! 2. An encounter (arena, party, random enemies) via `EncounterBuilder`
//! 3. The battle runtime with a stdin player, or AI on both sides
//!
//! # Examples
//!
//! ```bash
//! # Play the bundled content at a random arena
//! cargo run -p battle-client
//!
//! # Watch a fully automatic battle at a fixed arena and seed
//! BATTLE_AUTO=1 BATTLE_ARENA="Frozen Lake" BATTLE_SEED=7 cargo run -p battle-client
//! ```
mod config;
mod logging;
mod prompt;

use anyhow::Result;
use battle_content::ContentFactory;
use battle_core::{BattleOutcome, Roster, compute_seed};
use battle_runtime::{
    BattleCatalog, BattleRuntime, EncounterBuilder, Event, RandomAi, RuntimeConfig, RuntimeError,
    Topic, describe, player_channel,
};
use tokio::sync::broadcast;

use config::{ClientConfig, EventFormat};

/// Seed stream for the enemy AI.
const ENEMY_AI_STREAM: u32 = 0xE1;
/// Seed stream for the party AI in auto mode.
const PARTY_AI_STREAM: u32 = 0xA11;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    // 1. Content
    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::info!("Loading content from {}", factory.data_dir().display());
    let content = factory.load_catalog()?;

    let mut runtime_config = RuntimeConfig::default()
        .with_battle(content.rules.clone())
        .with_env();
    let seed = runtime_config.seed.unwrap_or_else(rand::random);
    runtime_config.seed = Some(seed);
    tracing::info!(seed, auto = config.auto, "Starting arena-sim");

    // 2. Encounter
    let catalog = BattleCatalog::from_content(content)?;
    let mut encounter = EncounterBuilder::new(catalog)
        .party(config.party.iter().cloned())
        .seed(seed);
    if let Some(arena) = &config.arena {
        encounter = encounter.arena(arena.clone());
    }
    let context = encounter.build()?;

    // 3. Runtime
    let builder = BattleRuntime::builder()
        .config(runtime_config)
        .context(context)
        .enemy_provider(RandomAi::new(compute_seed(seed, 0, 0, ENEMY_AI_STREAM)));
    let (builder, player_input) = if config.auto {
        let party_ai = RandomAi::new(compute_seed(seed, 0, 0, PARTY_AI_STREAM));
        (builder.ally_provider(party_ai), None)
    } else {
        let (proxy, input) = player_channel(1);
        (builder.ally_provider(proxy), Some(input))
    };
    let mut runtime = builder.build()?;
    let abort = runtime.abort_handle();

    if let Some(input) = player_input {
        tokio::spawn(prompt::serve_player(input, abort.clone()));
    }
    tokio::spawn({
        let abort = abort.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, aborting battle");
                abort.abort();
            }
        }
    });

    println!("Arena: {}", runtime.arena().name);
    for entity in runtime.snapshot().iter() {
        println!("  {} ({:.1} hp)", entity, entity.health());
    }

    // Topics are drained in the order their events happen within a round.
    let mut receivers = [Topic::Round, Topic::Combat, Topic::Outcome].map(|t| runtime.subscribe(t));
    let result = loop {
        let step = runtime.run_round().await;
        print_events(&mut receivers, &runtime.snapshot(), config.event_format)?;
        match step {
            Ok(Some(outcome)) => break Ok(outcome),
            Ok(None) => continue,
            Err(err) => break Err(err),
        }
    };

    match result {
        Ok(outcome) => {
            let verdict = match outcome {
                BattleOutcome::Won => "The party is victorious.",
                BattleOutcome::Lost => "The party has been defeated.",
            };
            println!("{verdict} ({} rounds, seed {seed})", runtime.engine().round());
            Ok(())
        }
        Err(RuntimeError::Aborted { round }) => {
            println!("Battle abandoned in round {round}.");
            Ok(())
        }
        Err(err) => {
            tracing::error!("Battle failed: {err}");
            Err(err.into())
        }
    }
}

fn print_events(
    receivers: &mut [broadcast::Receiver<Event>],
    roster: &Roster,
    format: EventFormat,
) -> Result<()> {
    for rx in receivers.iter_mut() {
        loop {
            let event = match rx.try_recv() {
                Ok(event) => event,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {skipped} events; raise BATTLE_EVENT_BUFFER");
                    continue;
                }
                Err(_) => break,
            };
            match format {
                EventFormat::Json => println!("{}", serde_json::to_string(&event)?),
                EventFormat::Text => {
                    if let Some(line) = narrate(&event, roster) {
                        println!("{line}");
                    }
                }
            }
        }
    }
    Ok(())
}

fn narrate(event: &Event, roster: &Roster) -> Option<String> {
    let name = |id| {
        roster
            .get(id)
            .map(ToString::to_string)
            .unwrap_or_else(|| id.to_string())
    };
    match event {
        Event::Battle(event) => describe(event, roster),
        Event::MoveSkipped { actor, .. } => Some(format!("{} has nothing to do", name(*actor))),
        Event::MoveRejected { actor, reason, .. } => {
            Some(format!("{} cannot do that: {reason}", name(*actor)))
        }
    }
}
