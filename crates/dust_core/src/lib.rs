//! Dust Engine Core
//!
//! Contains the falling-sand simulation engine:
//! - Particle/component storage (per-kind locked stores)
//! - World, queries and lazy store creation
//! - Material spawners and the randomized emitter
//! - The per-tick system pipeline (gravity, movement, collision, flow, lifetime)
//! - A fixed-step simulation clock and the front-end facing `Simulation`

pub mod components;
pub mod ecs;
pub mod emitter;
pub mod materials;
pub mod simulation;
pub mod systems;
pub mod time;

pub use glam;

pub use components::{
    Acceleration, Behavior, Color, Lifetime, Material, Physics, Position, Size, Velocity,
};
pub use ecs::{
    Canvas, Component, ComponentKind, ComponentStore, Particle, ParticleBuilder, Query, World,
};
pub use emitter::Emitter;
pub use materials::{spawn_material, spawn_oil, spawn_sand, spawn_water, MaterialKind, UnknownMaterial};
pub use simulation::{ParticleSnapshot, Simulation, SimulationConfig};
pub use systems::{PipelineError, System, SystemDescriptor, SystemPipeline};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
