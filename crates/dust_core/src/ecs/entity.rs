//! Particle handle
//!
//! Particles are lightweight handles (8 bytes) that key into component stores.
//! Identifiers are allocated monotonically per `World` and never reused, so a
//! stale handle simply stops matching once its particle is destroyed.

use std::fmt;

/// Particle handle (opaque 64-bit id)
///
/// Example:
/// ```ignore
/// let p = world.create_particle();
/// world.destroy_particle(p);
/// assert!(!world.has_particle(p)); // never handed out again
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Particle(u64);

impl Particle {
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_order_by_id() {
        let a = Particle::from_raw(3);
        let b = Particle::from_raw(10);
        assert!(a < b);
        assert_eq!(b.id(), 10);
        assert_eq!(a.to_string(), "#3");
    }
}
