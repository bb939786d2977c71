//! Component behavior hooks.
//!
//! A `Behavior` is the concrete part of a component: its state and what it
//! does on each phase of a tick. The tree structure around it (name, parent,
//! children, activity) is owned by the arena, so hooks never see or mutate
//! the tree directly. Structural changes requested from a hook go through
//! `HookContext::defer` and are applied after the update pass.

use std::any::Any;

use crate::core::ComponentId;
use crate::owner::{CommandQueue, ComponentCommand};

/// Downcasting support for boxed behaviors.
///
/// Implemented for every `'static` type; implementors of `Behavior` get it
/// for free.
pub trait AsAny {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-phase hooks of a concrete component kind.
///
/// All hooks default to no-ops. The owner calls them only when the
/// component is effectively active and not locked for the current tick;
/// children are visited after their parent's hook returns.
///
/// ## Example
///
/// ```
/// use rust_component_tree::component::{Behavior, HookContext};
///
/// #[derive(Default)]
/// struct Countdown {
///     remaining: f32,
/// }
///
/// impl Behavior for Countdown {
///     fn update(&mut self, _ctx: &mut HookContext<'_>, dt: f32) {
///         self.remaining = (self.remaining - dt).max(0.0);
///     }
/// }
/// ```
pub trait Behavior: AsAny + Send {
    /// Called once after construction, when the component is added to an
    /// owner or created independently with `init = true`.
    fn init(&mut self, _ctx: &mut HookContext<'_>) {}

    /// First phase of a tick.
    fn pre_update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {}

    /// Second phase of a tick.
    fn update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {}

    /// Third phase of a tick.
    fn late_update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {}

    /// Called right before the component is handed back to its factory.
    fn on_destroy(&mut self, _name: &str) {}
}

/// Behavior with no logic of its own. Useful for pure grouping nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyBehavior;

impl Behavior for EmptyBehavior {}

/// What a hook may see and request while the tree is being traversed.
pub struct HookContext<'a> {
    id: ComponentId,
    name: &'a str,
    commands: &'a mut CommandQueue,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(id: ComponentId, name: &'a str, commands: &'a mut CommandQueue) -> Self {
        Self { id, name, commands }
    }

    /// Id of the component whose hook is running.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Name of the component whose hook is running.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Queue a structural change. It is applied after the current update
    /// pass completes.
    pub fn defer(&mut self, command: ComponentCommand) {
        self.commands.push(command);
    }

    /// Queue destruction of the running component.
    pub fn destroy_self(&mut self) {
        let id = self.id;
        self.commands.push(ComponentCommand::Destroy(id));
    }
}
