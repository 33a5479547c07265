//! Capability queries over live particles.
//!
//! A query is a declarative list of required component kinds. Executing it
//! walks the existence set once and keeps the particles present in every
//! required store.
//!
//! ```ignore
//! let fluids = world
//!     .query()
//!     .with::<Position>()
//!     .with::<Velocity>()
//!     .execute();
//! ```

use crate::ecs::storage::ErasedStore;
use crate::ecs::{Component, ComponentKind, ComponentStore, Particle, World};
use std::sync::Arc;

/// Builder for "all live particles that have every listed component".
pub struct Query<'w> {
    world: &'w World,
    required: Vec<Arc<dyn ErasedStore>>,
}

impl<'w> Query<'w> {
    pub(crate) fn new(world: &'w World) -> Self {
        Self {
            world,
            required: Vec::new(),
        }
    }

    /// Require component kind `T`.
    pub fn with<T: Component>(mut self) -> Self {
        self.required.push(self.world.erased_store::<T>());
        self
    }

    /// Require membership in an already cached store handle.
    pub fn with_store<T: Component>(mut self, store: &Arc<ComponentStore<T>>) -> Self {
        let erased: Arc<dyn ErasedStore> = Arc::clone(store) as Arc<dyn ErasedStore>;
        self.required.push(erased);
        self
    }

    /// Kinds this query requires, in the order they were added.
    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.required.iter().map(|store| store.kind()).collect()
    }

    /// Matching particles in ascending id order.
    ///
    /// The result is a copy taken at call time, not a live view.
    pub fn execute(&self) -> Vec<Particle> {
        self.world
            .alive_particles()
            .into_iter()
            .filter(|&particle| self.required.iter().all(|store| store.contains(particle)))
            .collect()
    }

    /// Call `f` for every particle `execute` returns.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Particle),
    {
        for particle in self.execute() {
            f(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Position, Size, Velocity};

    #[test]
    fn empty_query_returns_every_live_particle() {
        let world = World::new();
        let a = world.create_particle();
        let b = world.create_particle();
        let c = world.create_particle();
        world.destroy_particle(b);

        assert_eq!(world.query().execute(), vec![a, c]);
    }

    #[test]
    fn requirements_are_combined_with_and() {
        let world = World::new();
        let both = world.create_particle();
        let only_pos = world.create_particle();
        let only_vel = world.create_particle();

        world.insert(both, Position::new(0.0, 0.0));
        world.insert(both, Velocity::new(0.0, 0.0));
        world.insert(only_pos, Position::new(1.0, 1.0));
        world.insert(only_vel, Velocity::new(1.0, 1.0));

        let result = world.query().with::<Position>().with::<Velocity>().execute();
        assert_eq!(result, vec![both]);

        let positions = world.query().with::<Position>().execute();
        assert_eq!(positions, vec![both, only_pos]);
    }

    #[test]
    fn cached_store_handles_work_like_kinds() {
        let world = World::new();
        let sizes = world.store::<Size>();
        let p = world.create_particle();
        sizes.set(p, Size::new(0.5));

        let query = world.query().with_store(&sizes).with::<Position>();
        assert_eq!(query.kinds(), vec![ComponentKind::Size, ComponentKind::Position]);
        assert!(query.execute().is_empty());

        world.insert(p, Position::new(2.0, 2.0));
        assert_eq!(query.execute(), vec![p]);
    }

    #[test]
    fn results_are_a_snapshot() {
        let world = World::new();
        let p = world.create_particle();
        world.insert(p, Position::new(0.0, 0.0));

        let matched = world.query().with::<Position>().execute();
        world.destroy_particle(p);

        assert_eq!(matched, vec![p]);
        assert!(world.query().with::<Position>().execute().is_empty());
    }

    #[test]
    fn for_each_visits_matches_in_order() {
        let world = World::new();
        let ids: Vec<_> = (0..4).map(|_| world.create_particle()).collect();
        for &p in &ids[1..] {
            world.insert(p, Velocity::new(0.0, 0.0));
        }

        let mut seen = Vec::new();
        world.query().with::<Velocity>().for_each(|p| seen.push(p));
        assert_eq!(seen, ids[1..].to_vec());
    }
}
