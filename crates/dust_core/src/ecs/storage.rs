// storage.rs - Per-kind component storage
//
// One store per component kind, each behind its own readers-writer lock so
// independent kinds never contend. Values are kept ordered by particle id,
// which gives every snapshot a deterministic iteration order.

use crate::ecs::{Component, ComponentKind, Particle};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Storage for all values of a single component kind.
///
/// A particle is present only if the component was explicitly attached;
/// absence means "does not have this capability", never a default value.
pub struct ComponentStore<T: Component> {
    data: RwLock<BTreeMap<Particle, T>>,
}

impl<T: Component> ComponentStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert or overwrite the value attached to `particle`.
    pub fn set(&self, particle: Particle, value: T) {
        self.data.write().insert(particle, value);
    }

    /// Copy of the value attached to `particle`, if any.
    pub fn get(&self, particle: Particle) -> Option<T> {
        self.data.read().get(&particle).cloned()
    }

    pub fn has(&self, particle: Particle) -> bool {
        self.data.read().contains_key(&particle)
    }

    /// Detach the value. No-op when the particle is absent.
    pub fn remove(&self, particle: Particle) -> Option<T> {
        self.data.write().remove(&particle)
    }

    /// Read-modify-write under a single write lock.
    ///
    /// Returns `false` (and leaves the store untouched) when the particle has
    /// no value of this kind.
    pub fn update<F>(&self, particle: Particle, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.data.write().get_mut(&particle) {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Independent copy of the whole store, ordered by particle id.
    ///
    /// Safe to iterate while the store keeps changing.
    pub fn snapshot(&self) -> BTreeMap<Particle, T> {
        self.data.read().clone()
    }

    /// Particles that currently have this component, ascending.
    pub fn particles(&self) -> Vec<Particle> {
        self.data.read().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a store, used where the concrete kind is irrelevant:
/// query membership tests and the world's garbage sweep.
pub(crate) trait ErasedStore: Send + Sync {
    fn kind(&self) -> ComponentKind;
    fn contains(&self, particle: Particle) -> bool;
    fn discard_all(&self, particles: &[Particle]);
}

impl<T: Component> ErasedStore for ComponentStore<T> {
    fn kind(&self) -> ComponentKind {
        T::KIND
    }

    fn contains(&self, particle: Particle) -> bool {
        self.has(particle)
    }

    fn discard_all(&self, particles: &[Particle]) {
        let mut data = self.data.write();
        for particle in particles {
            data.remove(particle);
        }
    }
}
