use crate::ecs::ComponentKind;
use std::collections::BTreeMap;
use std::fmt;

/// How a system touches one component kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Access {
    Read,
    /// Implies read.
    Write,
}

/// Name and per-kind access of a system, checked at registration.
///
/// Each kind appears once; declaring a kind as written upgrades an earlier
/// read of the same kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemDescriptor {
    name: String,
    access: BTreeMap<ComponentKind, Access>,
}

impl SystemDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: BTreeMap::new(),
        }
    }

    pub fn reads(mut self, kinds: impl IntoIterator<Item = ComponentKind>) -> Self {
        for kind in kinds {
            self.access.entry(kind).or_insert(Access::Read);
        }
        self
    }

    pub fn writes(mut self, kinds: impl IntoIterator<Item = ComponentKind>) -> Self {
        for kind in kinds {
            self.access.insert(kind, Access::Write);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access(&self, kind: ComponentKind) -> Option<Access> {
        self.access.get(&kind).copied()
    }

    /// Kinds only read, in kind order.
    pub fn read_components(&self) -> Vec<ComponentKind> {
        self.kinds_with(Access::Read)
    }

    /// Kinds written, in kind order.
    pub fn write_components(&self) -> Vec<ComponentKind> {
        self.kinds_with(Access::Write)
    }

    pub fn is_empty(&self) -> bool {
        self.access.is_empty()
    }

    /// Kinds both systems write.
    pub fn shared_writes(&self, other: &SystemDescriptor) -> Vec<ComponentKind> {
        self.access
            .iter()
            .filter(|&(kind, &access)| {
                access == Access::Write && other.access(*kind) == Some(Access::Write)
            })
            .map(|(&kind, _)| kind)
            .collect()
    }

    fn kinds_with(&self, wanted: Access) -> Vec<ComponentKind> {
        self.access
            .iter()
            .filter(|&(_, &access)| access == wanted)
            .map(|(&kind, _)| kind)
            .collect()
    }
}

impl fmt::Display for SystemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.name)?;
        for (i, (kind, access)) in self.access.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let mode = match access {
                Access::Read => "r",
                Access::Write => "rw",
            };
            write!(f, "{kind}:{mode}")?;
        }
        f.write_str(")")
    }
}
