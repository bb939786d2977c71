//! The owner's four synchronized indices.
//!
//! - `roots`: registered components with no parent, in update order
//! - `by_name`: every registered component, regardless of depth
//! - `by_type`: concrete type -> name -> component
//! - `by_base_type`: base type -> name -> component
//!
//! Per-type maps are `BTreeMap`s so that "first active component" lookups
//! scan in name order and are reproducible between runs.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::core::{ComponentId, ComponentType};

/// Name-keyed map of components sharing a type or base type.
pub type NameMap = BTreeMap<String, ComponentId>;

/// Indices over the registered components of one owner.
#[derive(Clone, Debug, Default)]
pub struct ComponentIndex {
    roots: Vec<ComponentId>,
    by_name: FxHashMap<String, ComponentId>,
    by_type: FxHashMap<ComponentType, NameMap>,
    by_base_type: FxHashMap<String, NameMap>,
}

impl ComponentIndex {
    /// Create empty indices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create indices sized for `capacity` components.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            roots: Vec::with_capacity(capacity),
            by_name: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            by_type: FxHashMap::default(),
            by_base_type: FxHashMap::default(),
        }
    }

    /// Add a component to the name, type and base-type indices.
    pub(crate) fn insert(&mut self, id: ComponentId, name: &str, ty: ComponentType, base_type: &str) {
        self.by_name.insert(name.to_string(), id);
        self.by_type.entry(ty).or_default().insert(name.to_string(), id);
        self.by_base_type
            .entry(base_type.to_string())
            .or_default()
            .insert(name.to_string(), id);
    }

    /// Remove a component from the name, type and base-type indices.
    /// Sub-maps left empty are dropped.
    pub(crate) fn remove(&mut self, name: &str, ty: ComponentType, base_type: &str) -> Option<ComponentId> {
        let id = self.by_name.remove(name);

        if let Some(map) = self.by_type.get_mut(&ty) {
            map.remove(name);
            if map.is_empty() {
                self.by_type.remove(&ty);
            }
        }
        if let Some(map) = self.by_base_type.get_mut(base_type) {
            map.remove(name);
            if map.is_empty() {
                self.by_base_type.remove(base_type);
            }
        }
        id
    }

    /// Re-key a component under a new name. The root list holds ids, so
    /// the component keeps its update position.
    pub(crate) fn rename(&mut self, id: ComponentId, old: &str, new: &str, ty: ComponentType, base_type: &str) {
        self.remove(old, ty, base_type);
        self.insert(id, new, ty, base_type);
    }

    /// Insert into the root list. `None` appends; positions past the end
    /// are clamped.
    pub(crate) fn insert_root(&mut self, id: ComponentId, position: Option<usize>) {
        if self.roots.contains(&id) {
            return;
        }
        match position {
            Some(pos) => self.roots.insert(pos.min(self.roots.len()), id),
            None => self.roots.push(id),
        }
    }

    /// Remove from the root list. Returns whether it was present.
    pub(crate) fn remove_root(&mut self, id: ComponentId) -> bool {
        let before = self.roots.len();
        self.roots.retain(|r| *r != id);
        self.roots.len() != before
    }

    /// Root components in update order.
    #[must_use]
    pub fn roots(&self) -> &[ComponentId] {
        &self.roots
    }

    /// Look up a registered component by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ComponentId> {
        self.by_name.get(name).copied()
    }

    /// Check if a name is taken.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Components of a concrete type, in name order.
    #[must_use]
    pub fn of_type(&self, ty: ComponentType) -> Option<&NameMap> {
        self.by_type.get(&ty)
    }

    /// Components of a base type, in name order.
    #[must_use]
    pub fn of_base_type(&self, base_type: &str) -> Option<&NameMap> {
        self.by_base_type.get(base_type)
    }

    /// Indexed types, sorted by id.
    #[must_use]
    pub fn types(&self) -> Vec<ComponentType> {
        let mut types: Vec<_> = self.by_type.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterate over all registered components (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, ComponentId)> {
        self.by_name.iter().map(|(name, &id)| (name.as_str(), id))
    }
}
