//! Destruction: post-order subtree teardown through the type's factory.

use smallvec::SmallVec;

use super::{ComponentOwner, LifecycleEvent};
use crate::core::{ComponentError, ComponentId, Result};

impl ComponentOwner {
    /// Destroy a component and its whole subtree, children first.
    ///
    /// Each node is unindexed, unlinked from its parent, removed from the
    /// arena, given its `on_destroy` hook and handed to its factory.
    pub fn destroy_component(&mut self, id: ComponentId) -> Result<()> {
        if !self.arena.contains(id) {
            return Err(ComponentError::NotFound(id));
        }
        self.destroy_recursive(id);
        Ok(())
    }

    /// Destroy the registered component called `name`. Returns whether it
    /// existed.
    pub fn destroy_component_by_name(&mut self, name: &str) -> bool {
        match self.index.get(name) {
            Some(id) => {
                self.destroy_recursive(id);
                true
            }
            None => false,
        }
    }

    /// Destroy every registered component, type by type in id order.
    pub fn destroy_all_components(&mut self) {
        for ty in self.index.types() {
            let Some(map) = self.index.of_type(ty) else {
                continue;
            };
            let snapshot: SmallVec<[ComponentId; 16]> = map.values().copied().collect();
            for id in snapshot {
                // Already gone if an ancestor of another type came first.
                if self.arena.contains(id) {
                    self.destroy_recursive(id);
                }
            }
        }
        log::debug!("[{}] destroyed all components", self.config.label);
    }

    fn destroy_recursive(&mut self, id: ComponentId) {
        for child in self.arena.children_snapshot(id) {
            self.destroy_recursive(child);
        }
        self.destroy_single(id);
    }

    fn destroy_single(&mut self, id: ComponentId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let parent = node.parent;
        if node.registered {
            self.unindex_component(id);
        }
        if let Some(parent) = parent {
            if let Err(err) = self.arena.unlink_child(parent, id) {
                log::error!("[{}] broken parent link while destroying: {}", self.config.label, err);
            }
        }
        let Some(mut component) = self.arena.remove(id) else {
            return;
        };

        component.behavior.on_destroy(&component.name);
        let event = self.config.record_events.then(|| LifecycleEvent::Destroyed {
            name: component.name.clone(),
            type_name: component.type_name.clone(),
        });
        log::debug!("[{}] destroyed component `{}`", self.config.label, component.name);

        match self.factories.entry(component.component_type) {
            Some(entry) => entry.factory.destroy_component(component),
            None => drop(component),
        }
        self.events.extend(event);
    }
}

impl Drop for ComponentOwner {
    fn drop(&mut self) {
        self.destroy_all_components();
        // Independent components that were never attached.
        for id in self.arena.ids() {
            if self.arena.contains(id) {
                self.destroy_recursive(id);
            }
        }
    }
}
