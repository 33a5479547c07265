//! Plain-data particle components.
//!
//! Each type is attached through exactly one store in the `World`. Missing a
//! component means the particle lacks that capability.

use crate::define_component;
use crate::materials::MaterialKind;
use glam::DVec2;

/// Location on the canvas (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    pub const fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }
}

/// Constant acceleration applied to velocity every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    pub ax: f64,
    pub ay: f64,
}

impl Acceleration {
    pub const fn new(ax: f64, ay: f64) -> Self {
        Self { ax, ay }
    }
}

/// Bulk response to boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub mass: f64,
    /// Fraction of horizontal speed lost per second while on the floor.
    pub friction: f64,
    /// Fraction of speed kept when bouncing off a boundary.
    pub elasticity: f64,
}

/// Capability flags. Only `can_flow` drives a system today.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Behavior {
    pub can_flow: bool,
    pub can_burn: bool,
    pub can_freeze: bool,
    pub can_melt: bool,
    pub can_evaporate: bool,
    pub density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub kind: MaterialKind,
}

impl Material {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// RGBA color, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// 8-bit channels for terminal true-color output.
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub radius: f64,
}

impl Size {
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }
}

/// Age tracking for particles that expire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    /// Age in seconds.
    pub current: f64,
    /// Age at which the particle is destroyed.
    pub max: f64,
}

impl Lifetime {
    pub const fn new(max: f64) -> Self {
        Self { current: 0.0, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current < self.max
    }

    pub fn age(&mut self, dt: f64) {
        self.current += dt;
    }

    /// 1.0 at birth down to 0.0 at death, for fading out.
    pub fn alpha(&self) -> f64 {
        if self.max == 0.0 {
            return 1.0;
        }
        1.0 - (self.current / self.max)
    }
}

define_component!(Position, Position);
define_component!(Velocity, Velocity);
define_component!(Acceleration, Acceleration);
define_component!(Physics, Physics);
define_component!(Behavior, Behavior);
define_component!(Material, Material);
define_component!(Color, Color);
define_component!(Size, Size);
define_component!(Lifetime, Lifetime);
