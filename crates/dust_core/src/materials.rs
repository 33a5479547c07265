//! Material spawners.
//!
//! Every material is a fixed component bundle. Spawning never fails and never
//! validates coordinates: out-of-canvas particles are pulled back by the
//! collision pass on the next tick.

use crate::components::{Behavior, Color, Material, Physics, Position, Size, Velocity};
use crate::ecs::{Particle, World};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Sand,
    Water,
    Oil,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 3] = [MaterialKind::Sand, MaterialKind::Water, MaterialKind::Oil];

    pub const fn name(self) -> &'static str {
        match self {
            MaterialKind::Sand => "Sand",
            MaterialKind::Water => "Water",
            MaterialKind::Oil => "Oil",
        }
    }

    /// Fixed attribute bundle for this material.
    pub const fn recipe(self) -> MaterialRecipe {
        match self {
            MaterialKind::Sand => MaterialRecipe {
                physics: Physics {
                    mass: 1.0,
                    friction: 0.2,
                    elasticity: 0.1,
                },
                behavior: Behavior {
                    can_flow: false,
                    can_burn: false,
                    can_freeze: false,
                    can_melt: false,
                    can_evaporate: false,
                    density: 2.5,
                },
                color: Color::rgb(0.76, 0.70, 0.50),
                radius: 0.30,
            },
            MaterialKind::Water => MaterialRecipe {
                physics: Physics {
                    mass: 1.0,
                    friction: 0.1,
                    elasticity: 0.0,
                },
                behavior: Behavior {
                    can_flow: true,
                    can_burn: false,
                    can_freeze: false,
                    can_melt: false,
                    can_evaporate: false,
                    density: 1.0,
                },
                color: Color::rgb(0.20, 0.60, 0.90),
                radius: 0.40,
            },
            MaterialKind::Oil => MaterialRecipe {
                physics: Physics {
                    mass: 0.8,
                    friction: 0.05,
                    elasticity: 0.0,
                },
                behavior: Behavior {
                    can_flow: true,
                    can_burn: true,
                    can_freeze: false,
                    can_melt: false,
                    can_evaporate: false,
                    density: 0.9,
                },
                color: Color::rgb(0.30, 0.30, 0.10),
                radius: 0.45,
            },
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown material name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material '{0}'")]
pub struct UnknownMaterial(pub String);

impl FromStr for MaterialKind {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

/// Attributes shared by every particle of one material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialRecipe {
    pub physics: Physics,
    pub behavior: Behavior,
    pub color: Color,
    pub radius: f64,
}

/// Create a particle of `kind` at rest at `(x, y)`.
pub fn spawn_material(world: &World, kind: MaterialKind, x: f64, y: f64) -> Particle {
    let recipe = kind.recipe();
    let particle = world
        .build_particle()
        .with(Position::new(x, y))
        .with(Velocity::new(0.0, 0.0))
        .with(recipe.physics)
        .with(recipe.behavior)
        .with(Material { kind })
        .with(recipe.color)
        .with(Size::new(recipe.radius))
        .spawn();

    tracing::trace!(%particle, material = %kind, x, y, "spawned");
    particle
}

pub fn spawn_sand(world: &World, x: f64, y: f64) -> Particle {
    spawn_material(world, MaterialKind::Sand, x, y)
}

pub fn spawn_water(world: &World, x: f64, y: f64) -> Particle {
    spawn_material(world, MaterialKind::Water, x, y)
}

pub fn spawn_oil(world: &World, x: f64, y: f64) -> Particle {
    spawn_material(world, MaterialKind::Oil, x, y)
}
