//! # Skirmish Sim
//!
//! Headless driver for the Skirmish simulation core: runs a seeded
//! session with a scripted player for a fixed number of ticks and logs
//! the outcome. Useful for soak runs and for watching the combat event
//! stream without a renderer.
//!
//! Configuration comes from the environment:
//! - `SKIRMISH_SEED`  — RNG seed (default 42)
//! - `SKIRMISH_TICKS` — number of ticks to run (default 3600, one
//!   minute at 60 ticks per second)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skirmish_common::{GameRng, Vec2};
use skirmish_gameplay::config::WorldConfig;
use skirmish_gameplay::events::CombatEvent;
use skirmish_gameplay::session::GameSession;

const TICK_RATE: f32 = 60.0;
const EDGE_ENEMIES: usize = 10;

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Scripted input: circle-strafe around the arena center.
fn scripted_input(tick: u64) -> Vec2 {
    let angle = tick as f32 / TICK_RATE;
    Vec2::new(-angle.sin(), angle.cos())
}

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("skirmish=info".parse()?))
        .init();

    let seed = env_u64("SKIRMISH_SEED", 42);
    let ticks = env_u64("SKIRMISH_TICKS", 3600);
    info!(seed, ticks, "skirmish-sim starting");

    let mut session = GameSession::new(WorldConfig::default(), Box::new(GameRng::new(seed)));
    session.spawn_edge_enemies(EDGE_ENEMIES);

    let dt = 1.0 / TICK_RATE;
    let mut hits: u64 = 0;
    let mut shots: u64 = 0;
    for tick in 0..ticks {
        // Fire at the arena center once a second; the single-arrow rule
        // drops the pulse while one is still in flight.
        if tick % TICK_RATE as u64 == 0 {
            session.queue_fire(Vec2::ZERO);
        }
        session.update(dt, scripted_input(tick));

        for event in session.drain_events() {
            match event {
                CombatEvent::Hit { .. } => hits += 1,
                CombatEvent::ProjectileFired { .. } => shots += 1,
                CombatEvent::StateChanged { .. } => {},
                CombatEvent::Died { entity } => info!(?entity, tick, "entity died"),
            }
        }

        if tick % (TICK_RATE as u64 * 10) == 0 {
            info!(
                tick,
                player_health = session.player().health.current(),
                enemies_alive = session.living_enemy_count(),
                live_projectiles = session.live_projectiles().count(),
                "progress"
            );
        }

        if session.player().is_dead() || session.living_enemy_count() == 0 {
            break;
        }
    }

    info!(
        hits,
        shots,
        player_health = session.player().health.current(),
        player_dead = session.player().is_dead(),
        enemies_alive = session.living_enemy_count(),
        "skirmish-sim finished"
    );
    Ok(())
}
