//! Structural operations: linking, ordering, renaming, attach and detach.
//!
//! Each operation validates everything first and only then mutates, so a
//! returned error always means the arena and the indices are unchanged.

use rustc_hash::FxHashSet;

use super::{ComponentOwner, LifecycleEvent};
use crate::core::{ComponentError, ComponentId, Result};

impl ComponentOwner {
    /// Link `child` under `parent`, appending it to the child list.
    ///
    /// Fails if a sibling already has `child`'s name, if `child` already
    /// has a parent, or if the link would make a component its own
    /// ancestor. A registered root leaves the root list.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        self.arena.link_child(parent, child)?;
        if self.arena[child].registered {
            self.index.remove_root(child);
        }
        log::trace!(
            "[{}] linked `{}` under `{}`",
            self.config.label,
            self.arena[child].name,
            self.arena[parent].name
        );
        Ok(())
    }

    /// Unlink `child` from `parent`. A registered child becomes a root and
    /// is appended to the root list.
    pub fn remove_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        self.arena.unlink_child(parent, child)?;
        if self.arena[child].registered {
            self.index.insert_root(child, None);
        }
        Ok(())
    }

    /// Move `child` to `dest` within `parent`'s child list.
    ///
    /// Fails without reordering if `dest` is out of bounds, `child` is not
    /// a child of `parent`, or it is already at `dest`.
    pub fn move_child_pos(&mut self, parent: ComponentId, child: ComponentId, dest: usize) -> Result<()> {
        self.arena.move_child(parent, child, dest)
    }

    /// Like `move_child_pos`, resolving the child by name first.
    pub fn move_child_pos_by_name(&mut self, parent: ComponentId, name: &str, dest: usize) -> Result<()> {
        let child = self
            .arena
            .try_get(parent)?
            .child_by_name(name)
            .ok_or_else(|| ComponentError::NameNotFound(name.to_string()))?;
        self.arena.move_child(parent, child, dest)
    }

    /// Position of `child` in `parent`'s child list.
    #[must_use]
    pub fn child_pos(&self, parent: ComponentId, child: ComponentId) -> Option<usize> {
        self.arena.child_pos(parent, child)
    }

    /// Rename a component.
    ///
    /// Renaming to the current name is a no-op. A registered component
    /// can't take a name used by any other registered component, and a
    /// parented one can't take a sibling's name. On failure the name, the
    /// indices and the parent's child map are all left as they were.
    pub fn rename(&mut self, id: ComponentId, new_name: &str) -> Result<()> {
        let node = self.arena.try_get(id)?;
        if node.name == new_name {
            return Ok(());
        }
        let old = node.name.clone();
        let parent = node.parent;
        let registered = node.registered;
        let ty = node.component_type;
        let base_type = node.base_type.clone();

        if registered {
            if self.index.contains_name(new_name) {
                log::warn!(
                    "[{}] can not rename `{}` to `{}`: name already in use",
                    self.config.label,
                    old,
                    new_name
                );
                return Err(ComponentError::NameCollision {
                    old,
                    new: new_name.to_string(),
                });
            }
            if self.index.get(&old) != Some(id) {
                return Err(ComponentError::NameNotFound(old));
            }
        }
        if let Some(parent) = parent {
            if let Err(err) = self.arena.can_rekey_child(parent, &old, new_name) {
                log::warn!("[{}] can not rename `{}`: {}", self.config.label, old, err);
                return Err(err);
            }
        }

        // Owner first, then the parent's map, then the node itself.
        if registered {
            self.index.rename(id, &old, new_name, ty, &base_type);
        }
        if let Some(parent) = parent {
            self.arena.rekey_child(parent, &old, new_name)?;
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.name = new_name.to_string();
        }

        log::debug!("[{}] renamed `{}` to `{}`", self.config.label, old, new_name);
        self.record(|| LifecycleEvent::Renamed {
            old,
            new: new_name.to_string(),
        });
        Ok(())
    }

    /// Register `id` and its whole subtree with this owner, and optionally
    /// link it under `parent`.
    ///
    /// - Registration only happens if `id` isn't registered yet. Already
    ///   registered descendants are skipped. Parent/child structure inside
    ///   the subtree is never changed.
    /// - `parent` is only used when `id` has no parent. The component is
    ///   appended and then moved to `position`. An invalid or unchanged
    ///   position leaves it at the end.
    /// - If `id` stays parentless, `position` is its root-list slot.
    ///
    /// Fails before any change if a subtree name collides with a different
    /// registered component, or if the parent link is invalid.
    pub fn attach(&mut self, id: ComponentId, parent: Option<ComponentId>, position: Option<usize>) -> Result<()> {
        let node = self.arena.try_get(id)?;
        let link_to = parent.filter(|_| node.parent.is_none());
        let register = !node.registered;

        if let Some(parent) = link_to {
            self.arena.can_link(parent, id)?;
        }
        let to_register: Vec<ComponentId> = if register {
            self.arena
                .subtree(id)
                .into_iter()
                .filter(|&cid| !self.arena[cid].registered)
                .collect()
        } else {
            Vec::new()
        };
        self.check_names_free(&to_register)?;

        if let Some(parent) = link_to {
            self.arena.link_child(parent, id)?;
            if self.arena[id].registered {
                self.index.remove_root(id);
            }
            if let Some(dest) = position {
                if let Err(err) = self.arena.move_child(parent, id, dest) {
                    log::trace!("[{}] attach kept child position: {}", self.config.label, err);
                }
            }
        }

        let root_position = if link_to.is_none() { position } else { None };
        for cid in to_register {
            self.index_component(cid, if cid == id { root_position } else { None });
            let name = self.arena[cid].name.clone();
            self.record(|| LifecycleEvent::Attached { name });
        }
        Ok(())
    }

    /// Unregister `id` and its whole subtree from this owner.
    ///
    /// With `owner_only == false` the component is also unlinked from its
    /// parent. Descendants always keep their parent links.
    pub fn detach(&mut self, id: ComponentId, owner_only: bool) -> Result<()> {
        let parent = self.arena.try_get(id)?.parent;

        for cid in self.arena.subtree(id) {
            if self.arena[cid].registered {
                self.unindex_component(cid);
                let name = self.arena[cid].name.clone();
                self.record(|| LifecycleEvent::Detached { name });
            }
        }

        if !owner_only {
            if let Some(parent) = parent {
                self.arena.unlink_child(parent, id)?;
            }
        }
        Ok(())
    }

    /// Check that every component in `ids` could be indexed under its
    /// current name.
    fn check_names_free(&self, ids: &[ComponentId]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for &cid in ids {
            let name = self.arena[cid].name.as_str();
            let taken = self.index.get(name).is_some_and(|existing| existing != cid);
            if taken || !seen.insert(name) {
                log::warn!("[{}] there is already a component named `{}`", self.config.label, name);
                return Err(ComponentError::DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }
}
