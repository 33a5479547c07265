//! Dust Services Layer
//!
//! Everything between the simulation core and a front-end: persisted
//! settings and the queue of spawn requests collected from user input.

pub mod input;
pub mod settings;

pub use input::{InputQueue, SpawnRequest};
pub use settings::{
    CanvasSettings, EmitterSettings, PhysicsSettings, SettingsError, SimSettings,
};
