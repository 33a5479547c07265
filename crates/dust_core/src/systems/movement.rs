use crate::components::{Acceleration, Position, Velocity};
use crate::ecs::{ComponentKind, ComponentStore, World};
use crate::systems::{System, SystemDescriptor};
use std::sync::Arc;

/// Explicit Euler integration: acceleration into velocity, velocity into position.
pub struct MovementSystem {
    positions: Arc<ComponentStore<Position>>,
    velocities: Arc<ComponentStore<Velocity>>,
    accelerations: Arc<ComponentStore<Acceleration>>,
}

impl MovementSystem {
    pub fn new(world: &World) -> Self {
        Self {
            positions: world.store::<Position>(),
            velocities: world.store::<Velocity>(),
            accelerations: world.store::<Acceleration>(),
        }
    }
}

impl System for MovementSystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("movement")
            .reads([ComponentKind::Acceleration])
            .writes([ComponentKind::Position, ComponentKind::Velocity])
    }

    fn update(&mut self, world: &World, dt: f64) {
        let moving = world
            .query()
            .with_store(&self.positions)
            .with_store(&self.velocities)
            .execute();

        for particle in moving {
            let Some(mut vel) = self.velocities.get(particle) else {
                continue;
            };

            if let Some(accel) = self.accelerations.get(particle) {
                vel.vx += accel.ax * dt;
                vel.vy += accel.ay * dt;
                self.velocities.set(particle, vel);
            }

            self.positions.update(particle, |pos| {
                pos.x += vel.vx * dt;
                pos.y += vel.vy * dt;
            });
        }
    }
}
