//! Error types for component operations.
//!
//! Every structural operation validates before it mutates, so an `Err`
//! always means nothing changed. Callers decide whether to retry with a
//! different name or type.

use thiserror::Error;

use super::id::ComponentId;

/// Errors returned by component and owner operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// A registered component already uses this name.
    #[error("there is already a component named `{0}`")]
    DuplicateName(String),

    /// No factory is registered for this type name.
    #[error("can not find component factory for type `{0}`")]
    UnknownType(String),

    /// A type with this name is already registered.
    #[error("component type `{0}` is already registered")]
    DuplicateType(String),

    /// The id does not resolve to a live component.
    #[error("component {0:?} does not exist")]
    NotFound(ComponentId),

    /// No registered component has this name.
    #[error("no component named `{0}`")]
    NameNotFound(String),

    /// The parent already has a child with this name.
    #[error("there is already a child named `{0}`")]
    DuplicateChildName(String),

    /// The component is not a child of the given parent.
    #[error("component {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent that was searched.
        parent: ComponentId,
        /// The component that was looked for.
        child: ComponentId,
    },

    /// The component is already linked to a parent.
    #[error("component {0:?} already has a parent")]
    AlreadyHasParent(ComponentId),

    /// Linking would make a component its own ancestor.
    #[error("linking {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The requested parent.
        parent: ComponentId,
        /// The requested child.
        child: ComponentId,
    },

    /// Destination position is outside the child list.
    #[error("position {pos} is out of bounds for {len} children")]
    PositionOutOfBounds {
        /// Requested position.
        pos: usize,
        /// Current child count.
        len: usize,
    },

    /// The child is already at the requested position.
    #[error("child is already at position {0}")]
    AlreadyAtPosition(usize),

    /// Renaming would collide with another registered component.
    #[error("can not rename `{old}` to `{new}`: name already in use")]
    NameCollision {
        /// Current name.
        old: String,
        /// Rejected name.
        new: String,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ComponentError>;
