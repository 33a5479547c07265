// world.rs - Particle existence, lazily created component stores and the canvas

use crate::ecs::storage::ErasedStore;
use crate::ecs::{Component, ComponentStore, Particle, ParticleBuilder, Query};
use crate::systems::System;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Drawable area the collision pass clamps against.
///
/// `floor_y` is the resting line; the y axis points down (row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
    pub floor_y: f64,
}

impl Canvas {
    pub fn new(width: i32, height: i32, floor_y: f64) -> Self {
        Self {
            width,
            height,
            floor_y,
        }
    }

    /// Whether a cell lies inside the grid. Non-positive sizes contain nothing.
    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(100, 100, 99.0)
    }
}

/// One lazily created store, kept both typed (for handles) and erased (for sweeps).
struct StoreSlot {
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn ErasedStore>,
}

impl StoreSlot {
    /// Typed handle for the store this slot was created with.
    ///
    /// Only called on the slot found under `TypeId::of::<T>()`, and that slot
    /// always holds a `ComponentStore<T>`, so the downcast cannot fail.
    fn typed_handle<T: Component>(&self) -> Arc<ComponentStore<T>> {
        Arc::clone(&self.typed)
            .downcast::<ComponentStore<T>>()
            .expect("store table is keyed by the stored type")
    }
}

/// The simulation world: particle existence plus one store per component kind.
///
/// Every piece of state sits behind its own lock, so a shared `&World` is
/// enough for systems to read and write:
/// - the existence set has its own lock, separate from component data
/// - the store table is a concurrent map, separate from each store's contents
/// - each store guards its own values
pub struct World {
    next_particle_id: AtomicU64,
    alive: RwLock<BTreeSet<Particle>>,
    graveyard: Mutex<Vec<Particle>>,
    stores: DashMap<TypeId, StoreSlot>,
    canvas: RwLock<Canvas>,
}

impl World {
    /// Create a new empty world with the default canvas.
    pub fn new() -> Self {
        Self::with_canvas(Canvas::default())
    }

    pub fn with_canvas(canvas: Canvas) -> Self {
        Self {
            next_particle_id: AtomicU64::new(1),
            alive: RwLock::new(BTreeSet::new()),
            graveyard: Mutex::new(Vec::new()),
            stores: DashMap::new(),
            canvas: RwLock::new(canvas),
        }
    }

    /// Allocate the next identifier and mark it alive.
    ///
    /// Identifiers are never reused. Exhausting the 64-bit space is not handled.
    pub fn create_particle(&self) -> Particle {
        self.build_particle().spawn()
    }

    /// Reserve the next identifier for a particle built up before it goes live.
    pub fn build_particle(&self) -> ParticleBuilder<'_> {
        let particle = Particle::from_raw(self.next_particle_id.fetch_add(1, Ordering::Relaxed));
        ParticleBuilder::new(self, particle)
    }

    pub(crate) fn publish(&self, particle: Particle) {
        self.alive.write().insert(particle);
    }

    /// Queue the components of a never-published particle for the next sweep.
    pub(crate) fn abandon(&self, particle: Particle) {
        self.graveyard.lock().push(particle);
    }

    /// Mark a particle dead.
    ///
    /// Its components stay in their stores until `collect_garbage` runs; the
    /// system that detects death removes whatever it owns right away.
    pub fn destroy_particle(&self, particle: Particle) -> bool {
        let removed = self.alive.write().remove(&particle);
        if removed {
            self.graveyard.lock().push(particle);
        }
        removed
    }

    pub fn has_particle(&self, particle: Particle) -> bool {
        self.alive.read().contains(&particle)
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.alive.read().len()
    }

    /// Live particles in ascending id order (a copy, not a live view).
    pub fn alive_particles(&self) -> Vec<Particle> {
        self.alive.read().iter().copied().collect()
    }

    /// Store for component kind `T`, created on first access.
    ///
    /// Concurrent first accesses resolve to a single store instance.
    pub fn store<T: Component>(&self) -> Arc<ComponentStore<T>> {
        let slot = self.stores.entry(TypeId::of::<T>()).or_insert_with(|| {
            tracing::debug!(kind = %T::KIND, "creating component store");
            let store = Arc::new(ComponentStore::<T>::new());
            StoreSlot {
                typed: store.clone(),
                erased: store,
            }
        });
        slot.typed_handle()
    }

    /// Number of component kinds that have a store.
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Attach a component to a particle (shorthand for `store::<T>().set`).
    pub fn insert<T: Component>(&self, particle: Particle, value: T) {
        self.store::<T>().set(particle, value);
    }

    /// Read a component of a live particle.
    ///
    /// Returns `None` for destroyed particles even if their stale value has not
    /// been swept yet.
    pub fn get<T: Component>(&self, particle: Particle) -> Option<T> {
        if !self.has_particle(particle) {
            return None;
        }
        self.store::<T>().get(particle)
    }

    /// Start a query over live particles.
    pub fn query(&self) -> Query<'_> {
        Query::new(self)
    }

    pub(crate) fn erased_store<T: Component>(&self) -> Arc<dyn ErasedStore> {
        self.store::<T>()
    }

    pub fn canvas(&self) -> Canvas {
        *self.canvas.read()
    }

    /// Resize the canvas. Takes effect on the next collision pass.
    pub fn set_canvas(&self, width: i32, height: i32, floor_y: f64) {
        let canvas = Canvas::new(width, height, floor_y);
        tracing::debug!(?canvas, "canvas updated");
        *self.canvas.write() = canvas;
    }

    /// Remove every component of destroyed particles from every store.
    ///
    /// Returns how many dead particles were swept.
    pub fn collect_garbage(&self) -> usize {
        let dead = std::mem::take(&mut *self.graveyard.lock());
        if dead.is_empty() {
            return 0;
        }

        let stores: Vec<Arc<dyn ErasedStore>> = self
            .stores
            .iter()
            .map(|slot| Arc::clone(&slot.erased))
            .collect();
        for store in stores {
            store.discard_all(&dead);
            tracing::trace!(kind = %store.kind(), swept = dead.len(), "swept store");
        }
        dead.len()
    }

    /// Run one simulation tick: every system once, in order, then sweep.
    pub fn update(&self, systems: &mut [Box<dyn System>], dt: f64) {
        for system in systems.iter_mut() {
            system.update(self, dt);
        }
        self.collect_garbage();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
