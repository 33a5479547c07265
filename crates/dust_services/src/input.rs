//! Spawn requests collected from user input
//!
//! A front-end records clicks (or scripted placements) as `SpawnRequest`s
//! between ticks; the queue is drained into the simulation before the next
//! tick runs.

use dust_core::{MaterialKind, Particle, Simulation};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub kind: MaterialKind,
    pub x: f64,
    pub y: f64,
}

impl SpawnRequest {
    pub fn new(kind: MaterialKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }
}

/// FIFO of pending spawn requests.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<SpawnRequest>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: SpawnRequest) {
        self.pending.push_back(request);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Spawn every pending request in arrival order.
    ///
    /// Off-canvas coordinates are accepted; the collision pass pulls those
    /// particles back inside on the next tick.
    pub fn drain_into(&mut self, sim: &Simulation) -> Vec<Particle> {
        let spawned: Vec<Particle> = self
            .pending
            .drain(..)
            .map(|request| sim.spawn(request.kind, request.x, request.y))
            .collect();

        if !spawned.is_empty() {
            tracing::debug!(count = spawned.len(), "applied spawn requests");
        }
        spawned
    }
}

impl Extend<SpawnRequest> for InputQueue {
    fn extend<I: IntoIterator<Item = SpawnRequest>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
