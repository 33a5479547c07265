//! Front-end facing simulation facade.
//!
//! Wraps a `World` and its standard system pipeline behind the handful of
//! calls a renderer needs: spawn, resize, advance, read back.

use crate::components::{Color, Lifetime, Position};
use crate::ecs::{Canvas, Particle, World};
use crate::emitter::Emitter;
use crate::materials::{spawn_material, MaterialKind};
use crate::systems::{PipelineError, SystemPipeline, DEFAULT_GRAVITY};
use crate::time::{SimulationClock, DEFAULT_TICK_DT};
use dust_metrics::TickTimer;
use rand::Rng;

/// Number of ticks the tick timer averages over.
const TICK_TIMER_WINDOW: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub gravity: f64,
    /// Delta time used by `Simulation::tick`.
    pub tick_dt: f64,
    pub canvas: Canvas,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            tick_dt: DEFAULT_TICK_DT,
            canvas: Canvas::new(80, 24, 23.0),
        }
    }
}

/// Render-side view of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot {
    pub id: Particle,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Color alpha, faded by remaining lifetime when the particle expires.
    pub a: f64,
}

impl ParticleSnapshot {
    /// Grid cell the particle falls in, if it lies on `canvas`.
    pub fn cell(&self, canvas: &Canvas) -> Option<(usize, usize)> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        let (x, y) = (self.x.floor(), self.y.floor());
        if x < f64::from(i32::MIN) || y < f64::from(i32::MIN) {
            return None;
        }
        let (cx, cy) = (x as i32, y as i32);
        canvas
            .contains_cell(cx, cy)
            .then(|| (cx as usize, cy as usize))
    }
}

pub struct Simulation {
    world: World,
    pipeline: SystemPipeline,
    clock: SimulationClock,
    config: SimulationConfig,
    tick_timer: TickTimer,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, PipelineError> {
        let world = World::with_canvas(config.canvas);
        let pipeline = SystemPipeline::standard(&world, config.gravity)?;
        tracing::info!(
            gravity = config.gravity,
            tick_dt = config.tick_dt,
            width = config.canvas.width,
            height = config.canvas.height,
            "simulation ready"
        );

        Ok(Self {
            world,
            pipeline,
            clock: SimulationClock::new(),
            config,
            tick_timer: TickTimer::new(TICK_TIMER_WINDOW),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pipeline(&self) -> &SystemPipeline {
        &self.pipeline
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tick_timer(&self) -> &TickTimer {
        &self.tick_timer
    }

    pub fn canvas(&self) -> Canvas {
        self.world.canvas()
    }

    /// Resize the canvas; the next collision pass clamps against it.
    pub fn set_canvas(&mut self, width: i32, height: i32, floor_y: f64) {
        self.world.set_canvas(width, height, floor_y);
        self.config.canvas = self.world.canvas();
    }

    /// Spawn a material particle. Coordinates are not validated.
    pub fn spawn(&self, kind: MaterialKind, x: f64, y: f64) -> Particle {
        spawn_material(&self.world, kind, x, y)
    }

    pub fn emit_burst<R: Rng + ?Sized>(
        &self,
        emitter: &Emitter,
        rng: &mut R,
        count: usize,
    ) -> Vec<Particle> {
        emitter.emit_burst(&self.world, rng, count)
    }

    /// Run the full pipeline once with a caller-supplied `dt`.
    pub fn advance(&mut self, dt: f64) {
        self.tick_timer.begin();
        let swept = self.pipeline.run(&self.world, dt);
        self.tick_timer.end();
        self.clock.advance(dt);

        tracing::trace!(
            tick = self.clock.tick_count(),
            particles = self.world.particle_count(),
            swept,
            "tick complete"
        );
    }

    /// Run the full pipeline once with the configured `dt`.
    pub fn tick(&mut self) {
        self.advance(self.config.tick_dt);
    }

    pub fn particle_count(&self) -> usize {
        self.world.particle_count()
    }

    /// Every live particle that has both a position and a color, ascending id.
    pub fn snapshot(&self) -> Vec<ParticleSnapshot> {
        let positions = self.world.store::<Position>();
        let colors = self.world.store::<Color>();
        let lifetimes = self.world.store::<Lifetime>();

        self.world
            .query()
            .with_store(&positions)
            .with_store(&colors)
            .execute()
            .into_iter()
            .filter_map(|id| {
                let pos = positions.get(id)?;
                let color = colors.get(id)?;
                let fade = lifetimes.get(id).map_or(1.0, |l| l.alpha().clamp(0.0, 1.0));
                Some(ParticleSnapshot {
                    id,
                    x: pos.x,
                    y: pos.y,
                    r: color.r,
                    g: color.g,
                    b: color.b,
                    a: color.a * fade,
                })
            })
            .collect()
    }
}
