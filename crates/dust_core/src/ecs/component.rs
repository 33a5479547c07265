// component.rs - Component kinds
//
// Every component type maps to exactly one entry of a fixed list of kinds.
// Stores are selected by the Rust type itself; the kind is what systems
// declare in their descriptors and what shows up in logs.

use std::fmt;

/// The closed set of component kinds the engine knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    Position,
    Velocity,
    Acceleration,
    Physics,
    Behavior,
    Material,
    Color,
    Size,
    Lifetime,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Position,
        ComponentKind::Velocity,
        ComponentKind::Acceleration,
        ComponentKind::Physics,
        ComponentKind::Behavior,
        ComponentKind::Material,
        ComponentKind::Color,
        ComponentKind::Size,
        ComponentKind::Lifetime,
    ];

    /// Human-readable name for debugging.
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Position => "Position",
            ComponentKind::Velocity => "Velocity",
            ComponentKind::Acceleration => "Acceleration",
            ComponentKind::Physics => "Physics",
            ComponentKind::Behavior => "Behavior",
            ComponentKind::Material => "Material",
            ComponentKind::Color => "Color",
            ComponentKind::Size => "Size",
            ComponentKind::Lifetime => "Lifetime",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for plain-data components.
///
/// Implementors must:
/// - Be cheap to clone (snapshots copy every value)
/// - Be Send + Sync (stores are shared between the world and cached system handles)
pub trait Component: 'static + Clone + Send + Sync {
    /// Kind this component is stored and reported under.
    const KIND: ComponentKind;
}

/// Helper macro to implement the `Component` trait.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct Position { x: f64, y: f64 }
///
/// define_component!(Position, Position);
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty, $kind:ident) => {
        impl $crate::ecs::Component for $ty {
            const KIND: $crate::ecs::ComponentKind = $crate::ecs::ComponentKind::$kind;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_unique_and_named() {
        let mut names: Vec<_> = ComponentKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ComponentKind::ALL.len());
        assert_eq!(ComponentKind::Lifetime.to_string(), "Lifetime");
    }
}
