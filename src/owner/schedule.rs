//! Tick dispatch over the root list.
//!
//! A tick is two passes: `update_pre_components` over roots whose type is
//! in the pre-update group, then `update_components` over the rest. Each
//! pass runs preUpdate, update and lateUpdate in turn over every root of
//! its group, then applies the commands hooks deferred during the pass.
//! Commands that fail to apply are logged and returned to the caller.

use smallvec::SmallVec;

use super::ComponentOwner;
use crate::component::{run_phase, Phase};
use crate::core::{ComponentError, ComponentId, UpdateGroup};

type RootSnapshot = SmallVec<[ComponentId; 16]>;

impl ComponentOwner {
    /// Run all three phases over the pre-update roots.
    ///
    /// Returns the errors of deferred commands that failed to apply.
    pub fn update_pre_components(&mut self, dt: f32) -> Vec<ComponentError> {
        self.update_group(UpdateGroup::PreUpdate, dt)
    }

    /// Run all three phases over the regular roots.
    ///
    /// Returns the errors of deferred commands that failed to apply.
    pub fn update_components(&mut self, dt: f32) -> Vec<ComponentError> {
        self.update_group(UpdateGroup::Regular, dt)
    }

    fn update_group(&mut self, group: UpdateGroup, dt: f32) -> Vec<ComponentError> {
        if self.index.is_empty() {
            return Vec::new();
        }
        let roots: RootSnapshot = self
            .index
            .roots()
            .iter()
            .copied()
            .filter(|&id| self.arena.get(id).is_some_and(|n| n.group() == group))
            .collect();
        log::trace!("[{}] {:?} pass over {} roots", self.config.label, group, roots.len());

        for phase in [Phase::PreUpdate, Phase::Update] {
            for &id in &roots {
                let ready = self
                    .arena
                    .get(id)
                    .is_some_and(|n| n.is_active_self() && !n.is_locked_one_tick());
                if ready {
                    run_phase(&mut self.arena, &mut self.commands, id, phase, dt);
                }
            }
        }

        for &id in &roots {
            let Some(node) = self.arena.get_mut(id) else {
                continue;
            };
            if !node.is_active_self() {
                continue;
            }
            if node.is_locked_one_tick() {
                node.set_lock_one_tick(false);
            } else {
                run_phase(&mut self.arena, &mut self.commands, id, Phase::LateUpdate, dt);
            }
        }

        if self.commands.is_empty() {
            Vec::new()
        } else {
            self.apply_deferred()
        }
    }
}
