//! Entity Component System core types.
//!
//! Particles are plain ids; every component kind lives in its own
//! `ComponentStore`, created lazily by the `World` on first access. Systems
//! find the particles they care about through `Query`.

mod builder;
mod component;
mod entity;
mod query;
mod storage;
mod world;

pub use builder::ParticleBuilder;
pub use component::{Component, ComponentKind};
pub use entity::Particle;
pub use query::Query;
pub use storage::ComponentStore;
pub use world::{Canvas, World};
