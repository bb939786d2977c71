//! The component owner: registry, indices and tick dispatch.
//!
//! A `ComponentOwner` holds every component of one scope (a room, a
//! session) in a `ComponentArena`. Components it has registered are also
//! tracked by four indices (`ComponentIndex`): the ordered root list, a
//! flat name map, and per-type and per-base-type name maps. Every
//! structural operation goes through the owner so that the tree links and
//! the indices change together or not at all.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rust_component_tree::component::EmptyBehavior;
//! use rust_component_tree::core::{OwnerConfig, TypeConfig};
//! use rust_component_tree::factory::{DefaultFactory, FactoryManager};
//! use rust_component_tree::owner::ComponentOwner;
//!
//! let mut factories = FactoryManager::new();
//! factories.register(TypeConfig::new("Seat"), DefaultFactory::<EmptyBehavior>::new()).unwrap();
//!
//! let mut room = ComponentOwner::new(OwnerConfig::new("room-1"), Arc::new(factories));
//! let seat = room.add_component("seat-0", "Seat").unwrap();
//!
//! assert_eq!(room.find("seat-0"), Some(seat));
//! assert!(room.add_component("seat-0", "Seat").is_err());
//!
//! room.update_pre_components(0.016);
//! room.update_components(0.016);
//! ```

mod command;
mod destroy;
mod index;
mod schedule;
mod tree;

pub use command::{CommandQueue, ComponentCommand, LifecycleEvent};
pub use index::{ComponentIndex, NameMap};

use std::sync::Arc;

use crate::component::{Behavior, Component, ComponentArena, HookContext};
use crate::core::{ComponentError, ComponentId, OwnerConfig, Result};
use crate::factory::FactoryManager;

/// Registry and update driver for a forest of components.
pub struct ComponentOwner {
    config: OwnerConfig,
    factories: Arc<FactoryManager>,
    arena: ComponentArena,
    index: ComponentIndex,
    commands: CommandQueue,
    events: Vec<LifecycleEvent>,
}

impl ComponentOwner {
    /// Create an owner that builds components with `factories`.
    #[must_use]
    pub fn new(config: OwnerConfig, factories: Arc<FactoryManager>) -> Self {
        Self {
            arena: ComponentArena::with_capacity(config.capacity),
            index: ComponentIndex::with_capacity(config.capacity),
            config,
            factories,
            commands: CommandQueue::new(),
            events: Vec::new(),
        }
    }

    /// Owner settings.
    #[must_use]
    pub fn config(&self) -> &OwnerConfig {
        &self.config
    }

    /// The shared type table.
    #[must_use]
    pub fn factories(&self) -> &Arc<FactoryManager> {
        &self.factories
    }

    /// Every component held, registered or not.
    #[must_use]
    pub fn arena(&self) -> &ComponentArena {
        &self.arena
    }

    /// The registration indices.
    #[must_use]
    pub fn index(&self) -> &ComponentIndex {
        &self.index
    }

    // === Creation ===

    /// Build a component through its type's factory without registering
    /// it. `init` runs the behavior's `init` hook.
    ///
    /// The name is not checked against registered components; that happens
    /// when the component is attached.
    pub fn create_independent_component(&mut self, name: &str, type_name: &str, init: bool) -> Result<ComponentId> {
        let id = self.build_component(name, type_name)?;
        if init {
            self.init_component(id);
        }
        Ok(id)
    }

    /// Create, initialize and register a new root component.
    ///
    /// Fails if any registered component already uses `name` or if
    /// `type_name` has no factory.
    pub fn add_component(&mut self, name: &str, type_name: &str) -> Result<ComponentId> {
        if self.index.contains_name(name) {
            log::warn!("[{}] there is already a component named `{}`", self.config.label, name);
            return Err(ComponentError::DuplicateName(name.to_string()));
        }

        let id = self.build_component(name, type_name)?;
        self.init_component(id);
        self.index_component(id, None);

        log::debug!("[{}] added component `{}` ({})", self.config.label, name, type_name);
        self.record(|| LifecycleEvent::Added {
            name: name.to_string(),
            type_name: type_name.to_string(),
        });
        Ok(id)
    }

    fn build_component(&mut self, name: &str, type_name: &str) -> Result<ComponentId> {
        let Some(entry) = self.factories.factory(type_name) else {
            log::warn!("[{}] can not find component factory, type: `{}`", self.config.label, type_name);
            return Err(ComponentError::UnknownType(type_name.to_string()));
        };

        let behavior = entry.factory.create_component(name);
        let component = Component::new(
            name,
            entry.id,
            entry.config.name.clone(),
            entry.config.base_type.clone(),
            entry.config.group,
            behavior,
        );
        Ok(self.arena.insert(component))
    }

    fn init_component(&mut self, id: ComponentId) {
        if let Some(node) = self.arena.get_mut(id) {
            let mut ctx = HookContext::new(id, &node.name, &mut self.commands);
            node.behavior.init(&mut ctx);
        }
    }

    // === Indexing ===

    /// Register one component in all indices. A parentless component also
    /// joins the root list at `root_position` (append when `None`).
    fn index_component(&mut self, id: ComponentId, root_position: Option<usize>) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.registered = true;
        self.index.insert(id, &node.name, node.component_type, &node.base_type);
        if node.parent.is_none() {
            self.index.insert_root(id, root_position);
        }
    }

    /// Remove one component from all indices.
    fn unindex_component(&mut self, id: ComponentId) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.registered = false;
        self.index.remove(&node.name, node.component_type, &node.base_type);
        if node.parent.is_none() {
            self.index.remove_root(id);
        }
    }

    // === Queries ===

    /// Get a component by id.
    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.arena.get(id)
    }

    /// Get a component by id, mutably. Only activity, the one-tick lock
    /// and the behavior can be changed through it.
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.arena.get_mut(id)
    }

    /// Look up a registered component by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ComponentId> {
        self.index.get(name)
    }

    /// Check if an id resolves to a live component.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.arena.contains(id)
    }

    /// Check if a component is registered with this owner.
    #[must_use]
    pub fn is_registered(&self, id: ComponentId) -> bool {
        self.arena.get(id).is_some_and(Component::is_registered)
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Registered parentless components, in update order.
    #[must_use]
    pub fn roots(&self) -> &[ComponentId] {
        self.index.roots()
    }

    /// Parent of a component.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.arena.get(id)?.parent()
    }

    /// Children of a component, in update order. Empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.arena.get(id).map(Component::children).unwrap_or_default()
    }

    /// Direct child of `parent` called `name`.
    #[must_use]
    pub fn child_by_name(&self, parent: ComponentId, name: &str) -> Option<ComponentId> {
        self.arena.get(parent)?.child_by_name(name)
    }

    /// Registered components of a type, in name order.
    pub fn components_of_type(&self, type_name: &str) -> impl Iterator<Item = ComponentId> + '_ {
        self.factories
            .type_of(type_name)
            .and_then(|ty| self.index.of_type(ty))
            .into_iter()
            .flat_map(|map| map.values().copied())
    }

    /// Registered components of a base type, in name order.
    pub fn components_of_base_type(&self, base_type: &str) -> impl Iterator<Item = ComponentId> + '_ {
        self.index
            .of_base_type(base_type)
            .into_iter()
            .flat_map(|map| map.values().copied())
    }

    /// Effective activity (own flag AND every ancestor's).
    #[must_use]
    pub fn is_active(&self, id: ComponentId) -> bool {
        self.arena.is_active(id)
    }

    /// First registered component of `type_name`, in name order, that is
    /// active and not locked for this tick.
    #[must_use]
    pub fn get_first_active_component(&self, type_name: &str) -> Option<ComponentId> {
        let ty = self.factories.type_of(type_name)?;
        self.first_available(self.index.of_type(ty)?)
    }

    /// First registered component of `base_type`, in name order, that is
    /// active and not locked for this tick.
    #[must_use]
    pub fn get_first_active_component_by_base_type(&self, base_type: &str) -> Option<ComponentId> {
        self.first_available(self.index.of_base_type(base_type)?)
    }

    fn first_available(&self, map: &NameMap) -> Option<ComponentId> {
        map.values().copied().find(|&id| {
            self.arena.is_active(id) && self.arena.get(id).is_some_and(|n| !n.is_locked_one_tick())
        })
    }

    // === Flags and behaviors ===

    /// Set a component's local activity flag.
    pub fn set_active(&mut self, id: ComponentId, active: bool) -> Result<()> {
        let node = self.arena.get_mut(id).ok_or(ComponentError::NotFound(id))?;
        node.set_active(active);
        Ok(())
    }

    /// Lock (or unlock) a component for the next tick.
    pub fn set_lock_one_tick(&mut self, id: ComponentId, lock: bool) -> Result<()> {
        let node = self.arena.get_mut(id).ok_or(ComponentError::NotFound(id))?;
        node.set_lock_one_tick(lock);
        Ok(())
    }

    /// Downcast a component's behavior.
    #[must_use]
    pub fn behavior<T: Behavior + 'static>(&self, id: ComponentId) -> Option<&T> {
        self.arena.get(id)?.downcast_ref::<T>()
    }

    /// Downcast a component's behavior, mutably.
    pub fn behavior_mut<T: Behavior + 'static>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.arena.get_mut(id)?.downcast_mut::<T>()
    }

    // === Events ===

    /// Queue an event if this owner records them.
    fn record(&mut self, event: impl FnOnce() -> LifecycleEvent) {
        if self.config.record_events {
            self.events.push(event());
        }
    }

    /// Lifecycle events queued since the last drain. Always empty unless
    /// `OwnerConfig::record_events` is set.
    #[must_use]
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Take every queued lifecycle event.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }
}

impl std::fmt::Debug for ComponentOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentOwner")
            .field("label", &self.config.label)
            .field("components", &self.arena.len())
            .field("registered", &self.index.len())
            .field("roots", &self.index.roots().len())
            .field("pending_commands", &self.commands.len())
            .finish()
    }
}
