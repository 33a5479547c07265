use crate::components::Velocity;
use crate::ecs::{ComponentKind, ComponentStore, World};
use crate::systems::{System, SystemDescriptor};
use std::sync::Arc;

/// Earth-ish gravity in canvas units per second squared (positive is down).
pub const DEFAULT_GRAVITY: f64 = 9.8;

/// Pulls every particle with a velocity downward.
pub struct GravitySystem {
    gravity: f64,
    velocities: Arc<ComponentStore<Velocity>>,
}

impl GravitySystem {
    pub fn new(world: &World, gravity: f64) -> Self {
        Self {
            gravity,
            velocities: world.store::<Velocity>(),
        }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }
}

impl System for GravitySystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("gravity").writes([ComponentKind::Velocity])
    }

    fn update(&mut self, world: &World, dt: f64) {
        let dv = self.gravity * dt;
        for particle in world.query().with_store(&self.velocities).execute() {
            self.velocities.update(particle, |v| v.vy += dv);
        }
    }
}
