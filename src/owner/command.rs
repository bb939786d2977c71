//! Deferred structural commands and lifecycle events.
//!
//! Hooks run while the owner is walking the tree, so they can't change it
//! directly. They queue a `ComponentCommand` instead. The owner applies the
//! queue after each update entry point (or whenever `apply_deferred` is
//! called), in FIFO order. Commands queued while the queue is being applied
//! are picked up by the next pass of the same drain.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::ComponentOwner;
use crate::core::{ComponentError, ComponentId, Result};

/// A structural change requested from inside a hook (or queued from outside
/// for the end of the tick).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentCommand {
    /// `add_component`, optionally linking the new component under `parent`.
    Add {
        /// Name of the new component.
        name: String,
        /// Registered type name.
        type_name: String,
        /// Parent to link under.
        parent: Option<ComponentId>,
    },
    /// `add_child`.
    AddChild {
        /// New parent.
        parent: ComponentId,
        /// Child to link.
        child: ComponentId,
    },
    /// `remove_child`.
    RemoveChild {
        /// Current parent.
        parent: ComponentId,
        /// Child to unlink.
        child: ComponentId,
    },
    /// `destroy_component`.
    Destroy(ComponentId),
    /// `destroy_component_by_name`.
    DestroyByName(String),
    /// `rename`.
    Rename {
        /// Component to rename.
        id: ComponentId,
        /// New name.
        name: String,
    },
    /// `set_active`.
    SetActive {
        /// Target component.
        id: ComponentId,
        /// New local activity flag.
        active: bool,
    },
    /// Lock the component for the next tick.
    LockOneTick(ComponentId),
    /// `attach`.
    Attach {
        /// Component to register.
        id: ComponentId,
        /// Parent to link under.
        parent: Option<ComponentId>,
        /// Child or root position.
        position: Option<usize>,
    },
    /// `detach`.
    Detach {
        /// Component to unregister.
        id: ComponentId,
        /// Keep the parent link.
        owner_only: bool,
    },
    /// `move_child_pos`.
    MoveChild {
        /// Parent whose list is reordered.
        parent: ComponentId,
        /// Child to move.
        child: ComponentId,
        /// Destination index.
        dest: usize,
    },
}

/// FIFO of pending commands.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    commands: VecDeque<ComponentCommand>,
}

impl CommandQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command.
    pub fn push(&mut self, command: ComponentCommand) {
        self.commands.push_back(command);
    }

    /// Number of pending commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take every pending command, leaving the queue empty.
    pub(crate) fn take(&mut self) -> VecDeque<ComponentCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// Something that happened to a component. Queued on the owner and handed
/// to game logic through `ComponentOwner::drain_events`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Created and registered by `add_component`.
    Added {
        /// Component name.
        name: String,
        /// Type name.
        type_name: String,
    },
    /// Registered by `attach`.
    Attached {
        /// Component name.
        name: String,
    },
    /// Unregistered by `detach`.
    Detached {
        /// Component name.
        name: String,
    },
    /// Renamed.
    Renamed {
        /// Previous name.
        old: String,
        /// Current name.
        new: String,
    },
    /// Destroyed and handed back to its factory.
    Destroyed {
        /// Component name.
        name: String,
        /// Type name.
        type_name: String,
    },
}

impl ComponentOwner {
    /// Queue a command for the end of the current (or next) update pass.
    pub fn defer(&mut self, command: ComponentCommand) {
        self.commands.push(command);
    }

    /// Number of queued commands.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Apply every queued command.
    ///
    /// Failures are logged and returned; they never stop the drain.
    /// Commands queued while applying (for example from an `init` hook of a
    /// component created by `Add`) are applied in follow-up passes, at most
    /// `OwnerConfig::max_command_passes` of them.
    pub fn apply_deferred(&mut self) -> Vec<ComponentError> {
        let mut errors = Vec::new();

        for _ in 0..self.config.max_command_passes.max(1) {
            let batch = self.commands.take();
            if batch.is_empty() {
                break;
            }
            log::trace!("[{}] applying {} deferred commands", self.config.label, batch.len());
            for command in batch {
                if let Err(err) = self.apply_command(command) {
                    log::warn!("[{}] deferred command failed: {}", self.config.label, err);
                    errors.push(err);
                }
            }
        }

        if !self.commands.is_empty() {
            log::warn!(
                "[{}] {} deferred commands still pending after {} passes",
                self.config.label,
                self.commands.len(),
                self.config.max_command_passes
            );
        }
        errors
    }

    fn apply_command(&mut self, command: ComponentCommand) -> Result<()> {
        match command {
            ComponentCommand::Add { name, type_name, parent } => {
                if let Some(parent) = parent {
                    let parent_node = self.arena.try_get(parent)?;
                    if parent_node.child_by_name(&name).is_some() {
                        return Err(ComponentError::DuplicateChildName(name));
                    }
                }
                let id = self.add_component(&name, &type_name)?;
                if let Some(parent) = parent {
                    self.add_child(parent, id)?;
                }
                Ok(())
            }
            ComponentCommand::AddChild { parent, child } => self.add_child(parent, child),
            ComponentCommand::RemoveChild { parent, child } => self.remove_child(parent, child),
            ComponentCommand::Destroy(id) => self.destroy_component(id),
            ComponentCommand::DestroyByName(name) => {
                if self.destroy_component_by_name(&name) {
                    Ok(())
                } else {
                    Err(ComponentError::NameNotFound(name))
                }
            }
            ComponentCommand::Rename { id, name } => self.rename(id, &name),
            ComponentCommand::SetActive { id, active } => self.set_active(id, active),
            ComponentCommand::LockOneTick(id) => self.set_lock_one_tick(id, true),
            ComponentCommand::Attach { id, parent, position } => self.attach(id, parent, position),
            ComponentCommand::Detach { id, owner_only } => self.detach(id, owner_only),
            ComponentCommand::MoveChild { parent, child, dest } => self.move_child_pos(parent, child, dest),
        }
    }
}
