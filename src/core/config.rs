//! Configuration types.
//!
//! Games configure the component system at startup by providing:
//! - `TypeConfig`: Declares a component type (base type, update group)
//! - `OwnerConfig`: Per-owner settings (log label, capacity, command drain)
//!
//! The engine never hardcodes component types - games declare them and
//! register a factory for each.

use serde::{Deserialize, Serialize};

use super::error::{ComponentError, Result};

/// Which of the two per-tick passes drives a root component.
///
/// All `PreUpdate` roots finish their whole preUpdate/update/lateUpdate
/// cycle before any `Regular` root starts its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UpdateGroup {
    /// Driven by `update_pre_components`.
    PreUpdate,
    /// Driven by `update_components`.
    #[default]
    Regular,
}

/// Declaration of a single component type.
///
/// ## Example
///
/// ```
/// use rust_component_tree::core::{TypeConfig, UpdateGroup};
///
/// let dice = TypeConfig::new("Dice").with_base_type("Logic").pre_update();
/// assert_eq!(dice.group, UpdateGroup::PreUpdate);
/// assert_eq!(dice.base_type, "Logic");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Concrete type name, used for factory lookup.
    pub name: String,

    /// Coarser classification. Empty when the type has none.
    #[serde(default)]
    pub base_type: String,

    /// Scheduling group for root components of this type.
    #[serde(default)]
    pub group: UpdateGroup,
}

impl TypeConfig {
    /// Create a regular-group type with no base type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: String::new(),
            group: UpdateGroup::Regular,
        }
    }

    /// Set the base type.
    #[must_use]
    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = base_type.into();
        self
    }

    /// Put the type in the pre-update group.
    #[must_use]
    pub fn pre_update(mut self) -> Self {
        self.group = UpdateGroup::PreUpdate;
        self
    }
}

/// Per-owner settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerConfig {
    /// Prefix for log lines (e.g. the room name).
    #[serde(default = "OwnerConfig::default_label")]
    pub label: String,

    /// Expected number of components, used to pre-size storage.
    #[serde(default)]
    pub capacity: usize,

    /// How many times `apply_deferred` re-drains commands queued while
    /// applying. Bounds runaway command chains.
    #[serde(default = "OwnerConfig::default_max_command_passes")]
    pub max_command_passes: usize,

    /// Queue `LifecycleEvent`s for `drain_events`. Off by default: an owner
    /// that records must be drained regularly or the queue keeps growing.
    #[serde(default)]
    pub record_events: bool,
}

impl OwnerConfig {
    fn default_label() -> String {
        "owner".to_string()
    }

    const fn default_max_command_passes() -> usize {
        8
    }

    /// Create a configuration with the given log label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the expected component count.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the deferred-command drain bound.
    #[must_use]
    pub fn with_max_command_passes(mut self, passes: usize) -> Self {
        self.max_command_passes = passes.max(1);
        self
    }

    /// Turn lifecycle event recording on or off.
    #[must_use]
    pub fn with_event_recording(mut self, record: bool) -> Self {
        self.record_events = record;
        self
    }

    /// Parse a configuration from JSON.
    ///
    /// ```
    /// use rust_component_tree::core::OwnerConfig;
    ///
    /// let config = OwnerConfig::from_json(r#"{ "label": "room-7", "capacity": 64 }"#).unwrap();
    /// assert_eq!(config.label, "room-7");
    /// assert_eq!(config.max_command_passes, 8);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ComponentError::Config(e.to_string()))
    }
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            label: Self::default_label(),
            capacity: 0,
            max_command_passes: Self::default_max_command_passes(),
            record_events: false,
        }
    }
}

/// Parse a list of type declarations from JSON.
///
/// ```
/// use rust_component_tree::core::{parse_type_configs, UpdateGroup};
///
/// let types = parse_type_configs(r#"[
///     { "name": "Dice", "base_type": "Logic", "group": "PreUpdate" },
///     { "name": "Chat" }
/// ]"#).unwrap();
/// assert_eq!(types.len(), 2);
/// assert_eq!(types[1].group, UpdateGroup::Regular);
/// ```
pub fn parse_type_configs(json: &str) -> Result<Vec<TypeConfig>> {
    serde_json::from_str(json).map_err(|e| ComponentError::Config(e.to_string()))
}
