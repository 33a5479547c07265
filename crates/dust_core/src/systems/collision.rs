//! Collision resolution.
//!
//! Two phases per tick:
//! 1. Pairwise separation of overlapping particles (positions only). Every
//!    unordered pair is visited exactly once, in ascending id order, and later
//!    pairs see the positions moved by earlier ones.
//! 2. Boundary clamping against the canvas floor, ceiling and side walls,
//!    reflecting velocity scaled by elasticity.

use crate::components::{Physics, Position, Size, Velocity};
use crate::ecs::{Canvas, ComponentKind, ComponentStore, Particle, World};
use crate::systems::{System, SystemDescriptor};
use dust_metrics::Counter;
use glam::DVec2;
use std::sync::Arc;

/// Squared centre distance below which a pair is treated as coincident and left alone.
pub const SEPARATION_NOISE_FLOOR_SQ: f64 = 0.01;
/// Vertical speed under which a particle on the floor comes to rest.
pub const FLOOR_REST_SPEED: f64 = 0.05;

pub struct CollisionSystem {
    positions: Arc<ComponentStore<Position>>,
    velocities: Arc<ComponentStore<Velocity>>,
    physics: Arc<ComponentStore<Physics>>,
    sizes: Arc<ComponentStore<Size>>,
    last_pair_checks: u64,
    last_separations: u64,
}

#[derive(Debug, Clone, Copy)]
struct Body {
    particle: Particle,
    center: DVec2,
    radius: f64,
    moved: bool,
}

impl CollisionSystem {
    pub fn new(world: &World) -> Self {
        Self {
            positions: world.store::<Position>(),
            velocities: world.store::<Velocity>(),
            physics: world.store::<Physics>(),
            sizes: world.store::<Size>(),
            last_pair_checks: 0,
            last_separations: 0,
        }
    }

    /// Pairs evaluated by the most recent separation phase.
    pub fn last_pair_checks(&self) -> u64 {
        self.last_pair_checks
    }

    /// Pairs actually pushed apart by the most recent separation phase.
    pub fn last_separations(&self) -> u64 {
        self.last_separations
    }

    fn separate(&mut self, world: &World) {
        let mut bodies: Vec<Body> = world
            .query()
            .with_store(&self.positions)
            .with_store(&self.sizes)
            .execute()
            .into_iter()
            .filter_map(|particle| {
                Some(Body {
                    particle,
                    center: self.positions.get(particle)?.as_vec(),
                    radius: self.sizes.get(particle)?.radius,
                    moved: false,
                })
            })
            .collect();

        let mut checks = 0u64;
        let mut separations = 0u64;
        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let first = &mut head[i];
            for second in tail.iter_mut() {
                checks += 1;
                if separate_pair(first, second) {
                    separations += 1;
                }
            }
        }

        for body in bodies.iter().filter(|b| b.moved) {
            self.positions.set(body.particle, Position::from(body.center));
        }

        self.last_pair_checks = checks;
        self.last_separations = separations;
        tracing::trace!(pairs = checks, separations, "separation pass");
    }

    fn clamp_to_canvas(&self, world: &World, dt: f64) {
        let canvas = world.canvas();
        let bounded = world
            .query()
            .with_store(&self.positions)
            .with_store(&self.velocities)
            .with_store(&self.physics)
            .execute();

        for particle in bounded {
            let (Some(mut pos), Some(mut vel), Some(physics)) = (
                self.positions.get(particle),
                self.velocities.get(particle),
                self.physics.get(particle),
            ) else {
                continue;
            };

            clamp_body(&mut pos, &mut vel, &physics, &canvas, dt);
            self.positions.set(particle, pos);
            self.velocities.set(particle, vel);
        }
    }
}

impl System for CollisionSystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("collision")
            .reads([ComponentKind::Size, ComponentKind::Physics])
            .writes([ComponentKind::Position, ComponentKind::Velocity])
    }

    fn update(&mut self, world: &World, dt: f64) {
        self.separate(world);
        self.clamp_to_canvas(world, dt);
    }

    fn record_metrics(&self, counters: &mut Counter) {
        counters.increment("pair_checks", self.last_pair_checks as usize);
        counters.increment("separations", self.last_separations as usize);
    }
}

/// Push two overlapping bodies apart by half the overlap each.
///
/// Returns whether they overlapped.
fn separate_pair(a: &mut Body, b: &mut Body) -> bool {
    let delta = b.center - a.center;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;

    if dist_sq >= min_dist * min_dist || dist_sq <= SEPARATION_NOISE_FLOOR_SQ {
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    let push = (min_dist - dist) * 0.5;
    a.center -= normal * push;
    b.center += normal * push;
    a.moved = true;
    b.moved = true;
    true
}

/// Clamp one body to the canvas, reflecting velocity on each blocked axis.
pub fn clamp_body(pos: &mut Position, vel: &mut Velocity, physics: &Physics, canvas: &Canvas, dt: f64) {
    let elasticity = physics.elasticity;

    if pos.y >= canvas.floor_y {
        pos.y = canvas.floor_y;
        vel.vy = -vel.vy * elasticity;
        vel.vx *= 1.0 - physics.friction * dt;
        if vel.vy.abs() < FLOOR_REST_SPEED {
            vel.vy = 0.0;
        }
    }

    if pos.y < 0.0 {
        pos.y = 0.0;
        vel.vy = -vel.vy * elasticity;
    }

    if pos.x < 0.0 {
        pos.x = 0.0;
        vel.vx = -vel.vx * elasticity;
    }
    let width = f64::from(canvas.width);
    if pos.x >= width {
        pos.x = width - 1.0;
        vel.vx = -vel.vx * elasticity;
    }
}
