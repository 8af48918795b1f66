//! Authoritative holdable-item server.
//!
//! Loads session content, boots the runtime with the arena collaborators,
//! plays a scripted duel and streams every event to stdout as JSON lines.
mod arena;
mod config;
mod logging;
mod session;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{ContentFactory, WorldConfig};
use runtime::{Runtime, RuntimeConfig};

use arena::Arena;
use config::{Cli, ServerConfig};
use session::{Duel, EventStream};

/// Named arena points; the graveyard takes the configured destination name.
const ARENA_ORIGIN: [f32; 3] = [0.0, 0.0, 0.0];
const GRAVEYARD: [f32; 3] = [0.0, 0.0, -50.0];

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env().apply(Cli::parse());
    let _log_guard = logging::setup_logging(&config.session_id, config.log_dir.as_deref())?;

    let factory = ContentFactory::new(&config.data_dir);
    let world = factory.load_config()?;
    let catalog = factory.load_catalog()?;
    tracing::info!(
        data_dir = %factory.data_dir().display(),
        archetypes = catalog.len(),
        "content loaded"
    );

    let arena = Arena::with_destinations([
        ("origin".to_owned(), ARENA_ORIGIN),
        (world.respawn_destination.clone(), GRAVEYARD),
    ]);

    let runtime = Runtime::builder()
        .config(runtime_config(&world, config.session_seed))
        .hit_test(arena.clone())
        .respawn(arena.clone())
        .build();
    let handle = runtime.handle();
    let stream = EventStream::start(&handle, config.stream_events);

    let items = session::spawn_all(&handle, &catalog, &world.spawns).await?;
    let summary = Duel::new(&handle, &arena, &items)
        .run(config.duel_rounds)
        .await
        .context("scripted duel failed")?;
    tracing::info!(?summary, "duel finished");

    let records = handle.query_all().await?;
    drop(handle);
    runtime.shutdown().await?;

    let (mirror, combat_events) = stream.finish().await?;
    let in_sync = records.iter().all(|record| {
        mirror.revision(record.instance) == Some(record.revision)
            && mirror.state(record.instance) == Some(&record.state)
    });
    tracing::info!(
        instances = records.len(),
        mirrored = mirror.len(),
        combat_events,
        in_sync,
        "session closed"
    );

    Ok(())
}

/// Maps the content-level world settings onto the runtime's knobs.
fn runtime_config(world: &WorldConfig, seed_override: Option<u64>) -> RuntimeConfig {
    RuntimeConfig {
        event_buffer_size: world.event_buffer,
        command_buffer_size: world.command_buffer,
        regen_period: Duration::from_millis(world.regen_period_ms),
        respawn_destination: world.respawn_destination.clone(),
        respawn_timeout: Duration::from_millis(world.respawn_timeout_ms),
        session_seed: seed_override.or(world.session_seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_override_beats_world_seed() {
        let world = WorldConfig {
            session_seed: Some(5),
            regen_period_ms: 250,
            ..WorldConfig::default()
        };

        let config = runtime_config(&world, Some(9));
        assert_eq!(config.session_seed, Some(9));
        assert_eq!(config.regen_period, Duration::from_millis(250));
        assert_eq!(config.respawn_destination, "graveyard");
        assert_eq!(config.respawn_timeout, Duration::from_secs(2));

        assert_eq!(runtime_config(&world, None).session_seed, Some(5));
    }
}
