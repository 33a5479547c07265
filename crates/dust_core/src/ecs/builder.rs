// builder.rs - Staged particle construction
//
// A builder reserves an id, attaches components to it while the particle is
// still invisible to queries, and publishes it to the alive set in one step.

use crate::ecs::{Component, Particle, World};

/// Particle under construction.
///
/// Components attached here land in their stores immediately, but the
/// particle only becomes alive on `spawn`. Readers never observe a partial
/// bundle. Dropping the builder without spawning hands the reserved id to the
/// garbage sweep.
#[must_use = "the particle stays invisible until `spawn` is called"]
pub struct ParticleBuilder<'w> {
    world: &'w World,
    particle: Particle,
    spawned: bool,
}

impl<'w> ParticleBuilder<'w> {
    pub(crate) fn new(world: &'w World, particle: Particle) -> Self {
        Self {
            world,
            particle,
            spawned: false,
        }
    }

    /// Id the particle will have once spawned.
    pub fn id(&self) -> Particle {
        self.particle
    }

    /// Attach a component.
    pub fn with<T: Component>(self, value: T) -> Self {
        self.world.store::<T>().set(self.particle, value);
        self
    }

    /// Attach a component when present.
    pub fn with_opt<T: Component>(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(value),
            None => self,
        }
    }

    /// Publish the particle with everything attached so far.
    pub fn spawn(mut self) -> Particle {
        self.spawned = true;
        self.world.publish(self.particle);
        self.particle
    }
}

impl Drop for ParticleBuilder<'_> {
    fn drop(&mut self) {
        if !self.spawned {
            self.world.abandon(self.particle);
        }
    }
}
