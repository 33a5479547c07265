//! Per-tick update passes.
//!
//! Systems run strictly one after another inside a tick. Each one caches the
//! store handles it needs at construction and queries the world for the
//! particles it applies to.

mod collision;
mod descriptor;
mod error;
mod flow;
mod gravity;
mod lifetime;
mod movement;
mod pipeline;

pub use collision::{clamp_body, CollisionSystem, FLOOR_REST_SPEED, SEPARATION_NOISE_FLOOR_SQ};
pub use descriptor::{Access, SystemDescriptor};
pub use error::PipelineError;
pub use flow::{FlowSystem, FLOW_DAMPING_X, FLOW_DAMPING_Y, FLOW_PUSH};
pub use gravity::{GravitySystem, DEFAULT_GRAVITY};
pub use lifetime::LifetimeSystem;
pub use movement::MovementSystem;
pub use pipeline::{SystemPipeline, WriteOverlap};

use crate::ecs::World;
use dust_metrics::Counter;

/// A stateless per-tick transformation of the particle population.
pub trait System: Send {
    /// Name and component access, validated when the system joins a pipeline.
    fn descriptor(&self) -> SystemDescriptor;

    /// Apply one tick of `dt` seconds.
    fn update(&mut self, world: &World, dt: f64);

    /// Add whatever the last `update` counted to the pipeline's counters.
    fn record_metrics(&self, _counters: &mut Counter) {}
}
