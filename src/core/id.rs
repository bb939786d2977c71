//! Component identification.
//!
//! Every component lives in a generational arena and is addressed by a
//! `ComponentId`. Parent, child and owner relations are stored as ids and
//! resolved through the arena, never as references.
//!
//! ## Usage
//!
//! ```
//! use rust_component_tree::core::ComponentType;
//!
//! let dice = ComponentType::new(3);
//! assert_eq!(dice.raw(), 3);
//! assert_eq!(dice.to_string(), "Type(3)");
//! ```

use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Stable handle to a component in the owner's arena.
    ///
    /// Keys are generational: once a component is destroyed its id never
    /// resolves again, even if the slot is reused.
    pub struct ComponentId;
}

/// Interned component type. The `FactoryManager` assigns these when a type
/// is registered.
///
/// The engine doesn't interpret type ids - they're opaque identifiers.
/// The type table maps them back to names, factories and update groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentType(pub u16);

impl ComponentType {
    /// Create a new type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into the type table.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.0)
    }
}
