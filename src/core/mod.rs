//! Core types: ids, configuration, errors.
//!
//! This module contains the fundamental building blocks shared by the
//! component tree, the factory table and the owner.

pub mod id;
pub mod config;
pub mod error;

pub use id::{ComponentId, ComponentType};
pub use config::{parse_type_configs, OwnerConfig, TypeConfig, UpdateGroup};
pub use error::{ComponentError, Result};
