//! Arena-based component forest.
//!
//! Components are stored in a generational `SlotMap` and reference each
//! other by `ComponentId`. The arena owns the parent/child links and keeps
//! each node's ordered child list and name map in agreement. It knows
//! nothing about the owner's indices; `ComponentOwner` wraps every
//! structural operation so that both stay in sync.

use slotmap::SlotMap;

use super::node::{ChildList, Component};
use crate::core::{ComponentError, ComponentId, Result};

/// Storage for every component an owner holds, registered or not.
#[derive(Debug, Default)]
pub struct ComponentArena {
    nodes: SlotMap<ComponentId, Component>,
}

impl ComponentArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` components.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Move a component into the arena.
    pub(crate) fn insert(&mut self, component: Component) -> ComponentId {
        self.nodes.insert(component)
    }

    /// Take a component out of the arena. Links are not touched; callers
    /// unlink first.
    pub(crate) fn remove(&mut self, id: ComponentId) -> Option<Component> {
        self.nodes.remove(id)
    }

    /// Get a component by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.nodes.get(id)
    }

    /// Get a mutable component by ID.
    #[inline]
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.nodes.get_mut(id)
    }

    /// Get a component or a `NotFound` error.
    pub(crate) fn try_get(&self, id: ComponentId) -> Result<&Component> {
        self.nodes.get(id).ok_or(ComponentError::NotFound(id))
    }

    /// Check if an id resolves to a live component.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of components held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all components.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.nodes.iter()
    }

    /// Snapshot of every live id.
    #[must_use]
    pub fn ids(&self) -> Vec<ComponentId> {
        self.nodes.keys().collect()
    }

    /// Effective activity: the component's own flag AND every ancestor's.
    ///
    /// Recomputed on every call so that toggling an ancestor is visible
    /// immediately. Unknown ids are inactive.
    #[must_use]
    pub fn is_active(&self, id: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            match self.nodes.get(cid) {
                Some(node) if node.active => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Check if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            if cid == ancestor {
                return true;
            }
            current = self.nodes.get(cid).and_then(|n| n.parent);
        }
        false
    }

    /// Position of `child` in `parent`'s child list.
    #[must_use]
    pub fn child_pos(&self, parent: ComponentId, child: ComponentId) -> Option<usize> {
        self.nodes
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == child)
    }

    /// `id` followed by all its descendants, parents before children.
    #[must_use]
    pub fn subtree(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cid) = stack.pop() {
            let Some(node) = self.nodes.get(cid) else {
                continue;
            };
            out.push(cid);
            // Reverse so the first child is visited first.
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Snapshot of a component's children.
    #[must_use]
    pub(crate) fn children_snapshot(&self, id: ComponentId) -> ChildList {
        self.nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Check that `child` could be linked under `parent` without changing
    /// anything.
    pub(crate) fn can_link(&self, parent: ComponentId, child: ComponentId) -> Result<()> {
        let parent_node = self.try_get(parent)?;
        let child_node = self.try_get(child)?;

        if child_node.parent.is_some() {
            return Err(ComponentError::AlreadyHasParent(child));
        }
        if parent_node.child_names.contains_key(&child_node.name) {
            return Err(ComponentError::DuplicateChildName(child_node.name.clone()));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(ComponentError::WouldCycle { parent, child });
        }
        Ok(())
    }

    /// Append `child` to `parent`'s children and set its parent link.
    pub(crate) fn link_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        self.can_link(parent, child)?;

        let name = self.nodes[child].name.clone();
        self.nodes[child].parent = Some(parent);
        let parent_node = &mut self.nodes[parent];
        parent_node.children.push(child);
        parent_node.child_names.insert(name, child);
        Ok(())
    }

    /// Remove `child` from `parent`'s children and clear its parent link.
    pub(crate) fn unlink_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        let child_name = self.try_get(child)?.name.clone();
        let parent_node = self.nodes.get_mut(parent).ok_or(ComponentError::NotFound(parent))?;

        if parent_node.child_names.get(&child_name) != Some(&child) {
            return Err(ComponentError::NotAChild { parent, child });
        }
        parent_node.child_names.remove(&child_name);
        parent_node.children.retain(|c| *c != child);
        self.nodes[child].parent = None;
        Ok(())
    }

    /// Relocate `child` to `dest` within `parent`'s list, preserving the
    /// relative order of the other children.
    pub(crate) fn move_child(&mut self, parent: ComponentId, child: ComponentId, dest: usize) -> Result<()> {
        let len = self.try_get(parent)?.children.len();
        if dest >= len {
            return Err(ComponentError::PositionOutOfBounds { pos: dest, len });
        }
        let pos = self
            .child_pos(parent, child)
            .ok_or(ComponentError::NotAChild { parent, child })?;
        if pos == dest {
            return Err(ComponentError::AlreadyAtPosition(pos));
        }

        let children = &mut self.nodes[parent].children;
        let moved = children.remove(pos);
        children.insert(dest, moved);
        Ok(())
    }

    /// Check that `parent`'s child map could re-key `old` to `new`.
    pub(crate) fn can_rekey_child(&self, parent: ComponentId, old: &str, new: &str) -> Result<()> {
        let parent_node = self.try_get(parent)?;
        if parent_node.child_names.contains_key(new) {
            return Err(ComponentError::DuplicateChildName(new.to_string()));
        }
        if !parent_node.child_names.contains_key(old) {
            return Err(ComponentError::NameNotFound(old.to_string()));
        }
        Ok(())
    }

    /// Re-key `parent`'s child map after a child rename. The ordered list
    /// holds ids and needs no change.
    pub(crate) fn rekey_child(&mut self, parent: ComponentId, old: &str, new: &str) -> Result<()> {
        self.can_rekey_child(parent, old, new)?;
        let parent_node = &mut self.nodes[parent];
        if let Some(id) = parent_node.child_names.remove(old) {
            parent_node.child_names.insert(new.to_string(), id);
        }
        Ok(())
    }
}

impl std::ops::Index<ComponentId> for ComponentArena {
    type Output = Component;

    fn index(&self, id: ComponentId) -> &Component {
        &self.nodes[id]
    }
}
