//! Randomized particle emitter.
//!
//! Emitted particles are short-lived sparks: jittered around the emitter,
//! launched with a random speed and heading, and destroyed by the lifetime
//! system once they reach `lifetime` seconds.

use crate::components::{Acceleration, Color, Lifetime, Position, Size, Velocity};
use crate::ecs::{Particle, World};
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    pub x: f64,
    pub y: f64,
    /// Particles appear uniformly (in angle and radius) within this distance.
    pub spread_radius: f64,
    pub velocity_min: f64,
    pub velocity_max: f64,
    /// Launch heading range in radians.
    pub angle_min: f64,
    pub angle_max: f64,
    /// Seconds until an emitted particle is destroyed.
    pub lifetime: f64,
    pub color: Color,
    pub size: f64,
    /// Constant acceleration attached to each particle, if any.
    pub acceleration: Option<Acceleration>,
}

impl Emitter {
    /// Emitter with the stock spark settings, positioned at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            spread_radius: 1.0,
            velocity_min: 10.0,
            velocity_max: 50.0,
            angle_min: 0.0,
            angle_max: TAU,
            lifetime: 2.0,
            color: Color::rgba(1.0, 0.5, 0.2, 1.0),
            size: 2.0,
            // Canvas y points down, so this is downward gravity.
            acceleration: Some(Acceleration::new(0.0, 9.8)),
        }
    }

    /// Spawn one particle with randomized position and velocity.
    pub fn emit<R: Rng + ?Sized>(&self, world: &World, rng: &mut R) -> Particle {
        let angle = rng.gen::<f64>() * TAU;
        let radius = rng.gen::<f64>() * self.spread_radius;
        let position = Position::new(self.x + radius * angle.cos(), self.y + radius * angle.sin());

        let speed = lerp(self.velocity_min, self.velocity_max, rng.gen::<f64>());
        let heading = lerp(self.angle_min, self.angle_max, rng.gen::<f64>());
        let velocity = Velocity::new(speed * heading.cos(), speed * heading.sin());

        world
            .build_particle()
            .with(position)
            .with(velocity)
            .with(Lifetime::new(self.lifetime))
            .with(self.color)
            .with(Size::new(self.size))
            .with_opt(self.acceleration)
            .spawn()
    }

    /// Spawn `count` independent particles.
    pub fn emit_burst<R: Rng + ?Sized>(
        &self,
        world: &World,
        rng: &mut R,
        count: usize,
    ) -> Vec<Particle> {
        let particles: Vec<_> = (0..count).map(|_| self.emit(world, rng)).collect();
        tracing::debug!(count, x = self.x, y = self.y, "emitted burst");
        particles
    }
}

#[inline]
fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + t * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn emitted_particles_respect_configured_ranges() {
        let world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let emitter = Emitter::new(40.0, 10.0);

        for p in emitter.emit_burst(&world, &mut rng, 64) {
            let pos = world.get::<Position>(p).unwrap();
            let offset = pos.as_vec() - glam::DVec2::new(40.0, 10.0);
            assert!(offset.length() <= emitter.spread_radius + 1e-9);

            let vel = world.get::<Velocity>(p).unwrap();
            let speed = (vel.vx * vel.vx + vel.vy * vel.vy).sqrt();
            assert!(speed >= 10.0 - 1e-9 && speed <= 50.0 + 1e-9);

            assert_eq!(world.get::<Lifetime>(p), Some(Lifetime::new(2.0)));
            assert_eq!(world.get::<Size>(p), Some(Size::new(2.0)));
            assert_eq!(world.get::<Acceleration>(p), Some(Acceleration::new(0.0, 9.8)));
        }
        assert_eq!(world.particle_count(), 64);
    }

    #[test]
    fn fixed_heading_and_speed_are_exact() {
        let world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let emitter = Emitter {
            spread_radius: 0.0,
            velocity_min: 5.0,
            velocity_max: 5.0,
            angle_min: 0.0,
            angle_max: 0.0,
            acceleration: None,
            ..Emitter::new(3.0, 4.0)
        };

        let p = emitter.emit(&world, &mut rng);
        assert_eq!(world.get::<Position>(p), Some(Position::new(3.0, 4.0)));
        assert_eq!(world.get::<Velocity>(p), Some(Velocity::new(5.0, 0.0)));
        assert_eq!(world.get::<Acceleration>(p), None);
    }

    #[test]
    fn same_seed_same_burst() {
        let emitter = Emitter::new(0.0, 0.0);
        let positions = |seed| {
            let world = World::new();
            let mut rng = StdRng::seed_from_u64(seed);
            emitter
                .emit_burst(&world, &mut rng, 8)
                .into_iter()
                .map(|p| world.get::<Position>(p).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(42), positions(42));
    }
}
