//! Vessel Bounds Fix demo harness
//!
//! Loads the config, then runs the guard against a simulated host for a few
//! minutes of game time with vessels spawning at random positions.

use std::path::PathBuf;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use vessel_bounds_fix::guard::SpawnVerdict;
use vessel_bounds_fix::sim::{EntityKind, Host, SimHost};
use vessel_bounds_fix::{BoundsGuard, ConfigStore, Journal};

/// Simulated host step (seconds)
const STEP: f64 = 0.5;
/// Total simulated time (seconds)
const DURATION: f64 = 300.0;
/// A vessel spawns every this many seconds
const SPAWN_INTERVAL: f64 = 45.0;
const WORLD_SIZE: u32 = 3500;
const SEED: u64 = 0x5eed;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Vessel Bounds Fix (demo) starting...");

    let data_dir = std::env::var_os("VESSEL_BOUNDS_FIX_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let config = ConfigStore::new(data_dir.join("config.json")).load();
    let journal = Journal::new(config, data_dir.join("logs"));

    let mut host = SimHost::new(WORLD_SIZE);
    let mut guard = BoundsGuard::with_journal(journal);
    let limit = guard.on_server_initialized(&host);
    let spread = limit.value() * 1.5;

    let mut rng = Pcg32::seed_from_u64(SEED);
    let mut spawned = 0u32;
    let mut corrected = 0u32;
    let steps = (DURATION / STEP) as u64;
    let spawn_every = (SPAWN_INTERVAL / STEP) as u64;

    for step in 0..=steps {
        let now = step as f64 * STEP;

        if step % spawn_every == 0 {
            let pos = Vec3::new(
                rng.random_range(-spread..spread),
                0.0,
                rng.random_range(-spread..spread),
            );
            host.spawn_natural(EntityKind::Vessel, pos);
            spawned += 1;
        }

        guard.update(&mut host, now);
        for event in host.drain_events() {
            if let SpawnVerdict::Corrected(_) = guard.on_entity_spawned(&event, now) {
                corrected += 1;
            }
        }
    }
    guard.unload();

    let strays: Vec<_> = host
        .live_vessels()
        .into_iter()
        .filter_map(|id| host.position(id))
        .filter(|pos| guard.corrected_position(*pos) != Some(*pos))
        .collect();

    println!("\nSimulated {:.0}s on a {} world (limit {})", DURATION, WORLD_SIZE, limit.value());
    println!("  vessels spawned:   {}", spawned);
    println!("  corrections:       {}", corrected);
    println!("  live vessels:      {}", host.live_vessels().len());
    println!("  still out of bounds: {}", strays.len());
    if strays.is_empty() {
        println!("✓ All live vessels are inside the map");
    }
}
