//! Dust Runtime
//!
//! Headless driver: loads settings, seeds a small scene, runs a fixed number
//! of ticks and prints the final frame as text.
//!
//! Usage: `dust [settings.json] [ticks]`

use anyhow::{Context, Result};
use dust_core::{MaterialKind, ParticleSnapshot, Simulation};
use dust_services::{InputQueue, SimSettings, SpawnRequest};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 600;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Dust v{}", dust_core::VERSION);

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => SimSettings::load(&path).with_context(|| format!("loading {path}"))?,
        None => SimSettings::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid tick count '{raw}'"))?,
        None => DEFAULT_TICKS,
    };

    let mut sim = Simulation::new(settings.to_simulation_config())?;
    for overlap in sim.pipeline().write_overlaps() {
        tracing::debug!(
            earlier = %overlap.earlier,
            later = %overlap.later,
            kinds = ?overlap.kinds,
            "shared writes resolved by run order"
        );
    }
    seed_scene(&sim, &settings);

    for _ in 0..ticks {
        sim.tick();
    }

    let timer = sim.tick_timer();
    tracing::info!(
        ticks = sim.clock().tick_count(),
        simulated_secs = sim.clock().elapsed(),
        particles = sim.particle_count(),
        tick_ms = timer.tick_time_ms(),
        ticks_per_sec = timer.ticks_per_second(),
        realtime_factor = timer.realtime_factor(sim.config().tick_dt),
        "run finished"
    );
    let counters = sim.pipeline().counters();
    tracing::info!(
        pair_checks = counters.get("pair_checks"),
        separations = counters.get("separations"),
        expired = counters.get("particles_expired"),
        "collision and lifetime totals"
    );
    for (system, timing) in sim.pipeline().profiler().timings() {
        tracing::info!(
            system = %system,
            total_ms = timing.total.as_secs_f64() * 1000.0,
            mean_us = timing.mean().as_secs_f64() * 1e6,
            passes = timing.calls,
            "system time"
        );
    }

    print!("{}", render_frame(&sim));
    Ok(())
}

/// A sand pile, a pool of water, an oil slick and one spark burst.
fn seed_scene(sim: &Simulation, settings: &SimSettings) {
    let canvas = sim.canvas();
    let third = f64::from(canvas.width) / 3.0;

    let mut queue = InputQueue::new();
    for i in 0..20 {
        let offset = f64::from(i % 5);
        let row = f64::from(i / 5);
        queue.push(SpawnRequest::new(MaterialKind::Sand, third * 0.5 + offset, row));
        queue.push(SpawnRequest::new(MaterialKind::Water, third * 1.5 + offset, row));
        queue.push(SpawnRequest::new(MaterialKind::Oil, third * 2.5 + offset, row));
    }
    let spawned = queue.drain_into(sim);

    let mut rng = rand::thread_rng();
    let emitter = settings.emitter.to_emitter();
    let sparks = sim.emit_burst(&emitter, &mut rng, settings.emitter.burst);
    tracing::info!(materials = spawned.len(), sparks = sparks.len(), "scene seeded");
}

fn render_frame(sim: &Simulation) -> String {
    let canvas = sim.canvas();
    let width = usize::try_from(canvas.width).unwrap_or(0);
    let height = usize::try_from(canvas.height).unwrap_or(0);
    let mut grid = vec![vec![' '; width]; height];

    for particle in sim.snapshot() {
        if let Some((x, y)) = particle.cell(&canvas) {
            grid[y][x] = glyph(sim, &particle);
        }
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

fn glyph(sim: &Simulation, particle: &ParticleSnapshot) -> char {
    match sim.world().get::<dust_core::Material>(particle.id).map(|m| m.kind) {
        Some(MaterialKind::Sand) => '#',
        Some(MaterialKind::Water) => '~',
        Some(MaterialKind::Oil) => 'o',
        None if particle.a > 0.5 => '*',
        None => '.',
    }
}
