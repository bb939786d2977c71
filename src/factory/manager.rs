//! Type table and factory lookup.
//!
//! The `FactoryManager` stores every registered component type. It provides
//! lookup by type name (at the API boundary) and by `ComponentType` (inside
//! the engine).

use rustc_hash::FxHashMap;

use super::ComponentFactory;
use crate::core::{ComponentError, ComponentType, Result, TypeConfig, UpdateGroup};

/// A registered component type.
pub struct TypeEntry {
    /// Interned id.
    pub id: ComponentType,

    /// Declaration (name, base type, update group).
    pub config: TypeConfig,

    /// Factory for this type.
    pub factory: Box<dyn ComponentFactory>,
}

impl TypeEntry {
    /// Type name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Scheduling group.
    #[inline]
    #[must_use]
    pub fn group(&self) -> UpdateGroup {
        self.config.group
    }

    /// Whether roots of this type run in the pre-update pass.
    #[inline]
    #[must_use]
    pub fn is_pre_update_type(&self) -> bool {
        self.config.group == UpdateGroup::PreUpdate
    }
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Registry of component types and their factories.
///
/// Usually built once at startup and shared between owners behind an `Arc`.
///
/// ## Example
///
/// ```
/// use rust_component_tree::component::EmptyBehavior;
/// use rust_component_tree::core::TypeConfig;
/// use rust_component_tree::factory::{DefaultFactory, FactoryManager};
///
/// let mut factories = FactoryManager::new();
/// let group = factories
///     .register(TypeConfig::new("Group"), DefaultFactory::<EmptyBehavior>::new())
///     .unwrap();
///
/// let entry = factories.factory("Group").unwrap();
/// assert_eq!(entry.id, group);
/// assert!(!entry.is_pre_update_type());
/// ```
#[derive(Debug, Default)]
pub struct FactoryManager {
    entries: Vec<TypeEntry>,
    by_name: FxHashMap<String, ComponentType>,
}

impl FactoryManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type with its factory.
    ///
    /// Fails if a type with the same name is already registered.
    pub fn register(
        &mut self,
        config: TypeConfig,
        factory: impl ComponentFactory + 'static,
    ) -> Result<ComponentType> {
        self.register_boxed(config, Box::new(factory))
    }

    /// Register a type with an already boxed factory.
    pub fn register_boxed(
        &mut self,
        config: TypeConfig,
        factory: Box<dyn ComponentFactory>,
    ) -> Result<ComponentType> {
        if self.by_name.contains_key(&config.name) {
            return Err(ComponentError::DuplicateType(config.name));
        }
        let raw = u16::try_from(self.entries.len())
            .map_err(|_| ComponentError::Config("too many component types".to_string()))?;
        let id = ComponentType::new(raw);

        log::debug!("registered component type `{}` as {} ({:?})", config.name, id, config.group);
        self.by_name.insert(config.name.clone(), id);
        self.entries.push(TypeEntry { id, config, factory });
        Ok(id)
    }

    /// Build a manager from declarations, asking `lookup` for the factory
    /// of each declared type.
    ///
    /// Fails with `UnknownType` for the first declaration `lookup` has no
    /// factory for.
    pub fn from_type_configs<F>(configs: impl IntoIterator<Item = TypeConfig>, mut lookup: F) -> Result<Self>
    where
        F: FnMut(&TypeConfig) -> Option<Box<dyn ComponentFactory>>,
    {
        let mut manager = Self::new();
        for config in configs {
            let Some(factory) = lookup(&config) else {
                return Err(ComponentError::UnknownType(config.name));
            };
            manager.register_boxed(config, factory)?;
        }
        Ok(manager)
    }

    /// Look up a type by name.
    #[must_use]
    pub fn factory(&self, type_name: &str) -> Option<&TypeEntry> {
        let id = self.by_name.get(type_name)?;
        self.entries.get(id.index())
    }

    /// Look up a type by id.
    #[inline]
    #[must_use]
    pub fn entry(&self, id: ComponentType) -> Option<&TypeEntry> {
        self.entries.get(id.index())
    }

    /// Resolve a type name to its id.
    #[must_use]
    pub fn type_of(&self, type_name: &str) -> Option<ComponentType> {
        self.by_name.get(type_name).copied()
    }

    /// Check if a type name is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.by_name.contains_key(type_name)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over registered types in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeEntry> {
        self.entries.iter()
    }
}
