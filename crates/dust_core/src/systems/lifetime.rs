use crate::components::Lifetime;
use crate::ecs::{ComponentKind, ComponentStore, World};
use crate::systems::{System, SystemDescriptor};
use dust_metrics::Counter;
use std::sync::Arc;

/// Ages expiring particles and destroys them once they reach their max age.
pub struct LifetimeSystem {
    lifetimes: Arc<ComponentStore<Lifetime>>,
    last_expired: usize,
}

impl LifetimeSystem {
    pub fn new(world: &World) -> Self {
        Self {
            lifetimes: world.store::<Lifetime>(),
            last_expired: 0,
        }
    }

    /// Particles destroyed by the most recent pass.
    pub fn last_expired(&self) -> usize {
        self.last_expired
    }
}

impl System for LifetimeSystem {
    fn descriptor(&self) -> SystemDescriptor {
        SystemDescriptor::new("lifetime").writes([ComponentKind::Lifetime])
    }

    fn update(&mut self, world: &World, dt: f64) {
        let mut expired = 0;
        for particle in world.query().with_store(&self.lifetimes).execute() {
            let Some(mut lifetime) = self.lifetimes.get(particle) else {
                continue;
            };

            lifetime.age(dt);
            if lifetime.is_alive() {
                self.lifetimes.set(particle, lifetime);
            } else {
                world.destroy_particle(particle);
                self.lifetimes.remove(particle);
                expired += 1;
            }
        }

        if expired > 0 {
            tracing::debug!(expired, "particles expired");
        }
        self.last_expired = expired;
    }

    fn record_metrics(&self, counters: &mut Counter) {
        counters.increment("particles_expired", self.last_expired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;

    #[test]
    fn particle_expires_when_age_reaches_max() {
        let world = World::new();
        let mut system = LifetimeSystem::new(&world);
        let p = world.create_particle();
        world.insert(
            p,
            Lifetime {
                current: 1.9,
                max: 2.0,
            },
        );

        system.update(&world, 0.2);

        assert!(!world.has_particle(p));
        assert!(!world.store::<Lifetime>().has(p));
        assert_eq!(system.last_expired(), 1);
    }

    #[test]
    fn surviving_particles_persist_their_age() {
        let world = World::new();
        let mut system = LifetimeSystem::new(&world);
        let p = world.create_particle();
        world.insert(p, Lifetime::new(2.0));

        system.update(&world, 0.5);

        assert!(world.has_particle(p));
        assert_eq!(world.get::<Lifetime>(p).map(|l| l.current), Some(0.5));
        assert_eq!(system.last_expired(), 0);
    }

    #[test]
    fn particles_without_lifetime_never_expire() {
        let world = World::new();
        let mut system = LifetimeSystem::new(&world);
        let p = world.create_particle();
        world.insert(p, Position::new(0.0, 0.0));

        for _ in 0..1000 {
            system.update(&world, 1.0);
        }
        assert!(world.has_particle(p));
    }

    #[test]
    fn other_components_linger_until_swept() {
        let world = World::new();
        let mut system = LifetimeSystem::new(&world);
        let p = world.create_particle();
        world.insert(p, Position::new(1.0, 1.0));
        world.insert(p, Lifetime::new(0.1));

        system.update(&world, 0.2);
        assert!(world.store::<Position>().has(p));
        assert_eq!(world.get::<Position>(p), None);

        world.collect_garbage();
        assert!(!world.store::<Position>().has(p));
    }
}
