//! # rust-component-tree
//!
//! Hierarchical component ownership and phased update scheduling for game
//! servers.
//!
//! ## Design Principles
//!
//! 1. **Single Authority**: Every structural change (link, rename, attach,
//!    destroy) goes through the `ComponentOwner`, which keeps the tree and
//!    its indices in step. Errors leave both untouched.
//!
//! 2. **Ids, Not Pointers**: Components live in a generational arena.
//!    Parent, child and owner relations are `ComponentId`s, so a stale id
//!    resolves to `None` instead of a dangling reference.
//!
//! 3. **Configuration Over Convention**: Component types, their base types
//!    and their update group are declared with `TypeConfig` and registered
//!    with a factory at startup.
//!
//! ## Tick Model
//!
//! - **Two groups**: `update_pre_components` runs roots whose type is in the
//!   pre-update group, `update_components` runs the rest.
//!
//! - **Three phases**: each group runs preUpdate, update and lateUpdate over
//!   its roots, cascading depth-first into active children.
//!
//! - **Deferred mutation**: hooks queue `ComponentCommand`s through their
//!   `HookContext`. The owner applies them after the pass.
//!
//! ## Modules
//!
//! - `core`: Ids, configuration, errors
//! - `component`: Component nodes, the arena, behaviors and the update cascade
//! - `factory`: Component factories and the type table
//! - `owner`: The owner, its indices, deferred commands and lifecycle events
//! - `logging`: `env_logger` setup

pub mod core;
pub mod component;
pub mod factory;
pub mod owner;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    ComponentId, ComponentType,
    ComponentError, Result,
    OwnerConfig, TypeConfig, UpdateGroup,
};

pub use crate::component::{Behavior, Component, ComponentArena, EmptyBehavior, HookContext, Phase};

pub use crate::factory::{ComponentFactory, DefaultFactory, FactoryManager, FnFactory, TypeEntry};

pub use crate::owner::{ComponentCommand, ComponentIndex, ComponentOwner, LifecycleEvent};
