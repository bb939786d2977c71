//! A single node of the component tree.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::behavior::Behavior;
use crate::core::{ComponentId, ComponentType, UpdateGroup};

/// Inline capacity of child lists. Most components have only a handful.
pub(crate) const INLINE_CHILDREN: usize = 4;

/// Ordered child list.
pub type ChildList = SmallVec<[ComponentId; INLINE_CHILDREN]>;

/// A named, typed node with activity state and a behavior.
///
/// Structural fields (name, parent, children, registration) are only
/// changed through the owner so that every index stays in sync. Activity,
/// the one-tick lock and the behavior itself may be changed freely.
pub struct Component {
    pub(crate) name: String,
    pub(crate) component_type: ComponentType,
    pub(crate) type_name: String,
    pub(crate) base_type: String,
    pub(crate) group: UpdateGroup,
    pub(crate) active: bool,
    pub(crate) lock_one_tick: bool,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: ChildList,
    pub(crate) child_names: FxHashMap<String, ComponentId>,
    pub(crate) registered: bool,
    pub(crate) behavior: Box<dyn Behavior>,
}

impl Component {
    /// Create a detached, active, unlocked component.
    pub(crate) fn new(
        name: impl Into<String>,
        component_type: ComponentType,
        type_name: impl Into<String>,
        base_type: impl Into<String>,
        group: UpdateGroup,
        behavior: Box<dyn Behavior>,
    ) -> Self {
        Self {
            name: name.into(),
            component_type,
            type_name: type_name.into(),
            base_type: base_type.into(),
            group,
            active: true,
            lock_one_tick: false,
            parent: None,
            children: ChildList::new(),
            child_names: FxHashMap::default(),
            registered: false,
            behavior,
        }
    }

    /// Component name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interned concrete type.
    #[inline]
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Concrete type name.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Base type name. Empty if the type declares none.
    #[inline]
    #[must_use]
    pub fn base_type(&self) -> &str {
        &self.base_type
    }

    /// Scheduling group, resolved from the type table at creation.
    #[inline]
    #[must_use]
    pub fn group(&self) -> UpdateGroup {
        self.group
    }

    /// Local activity flag. See `ComponentArena::is_active` for the
    /// effective value.
    #[inline]
    #[must_use]
    pub fn is_active_self(&self) -> bool {
        self.active
    }

    /// Set the local activity flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the next preUpdate/update pass is suppressed.
    #[inline]
    #[must_use]
    pub fn is_locked_one_tick(&self) -> bool {
        self.lock_one_tick
    }

    /// Suppress (or un-suppress) the next preUpdate/update pass. The lock
    /// clears itself on the matching lateUpdate.
    pub fn set_lock_one_tick(&mut self, lock: bool) {
        self.lock_one_tick = lock;
    }

    /// Parent id, `None` for roots and detached components.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Children in update order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Look up a direct child by name.
    #[must_use]
    pub fn child_by_name(&self, name: &str) -> Option<ComponentId> {
        self.child_names.get(name).copied()
    }

    /// Whether the owner indexes this component.
    #[inline]
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// The concrete behavior.
    #[must_use]
    pub fn behavior(&self) -> &dyn Behavior {
        self.behavior.as_ref()
    }

    /// The concrete behavior, mutably.
    pub fn behavior_mut(&mut self) -> &mut dyn Behavior {
        self.behavior.as_mut()
    }

    /// Downcast the behavior to its concrete type.
    #[must_use]
    pub fn downcast_ref<T: Behavior + 'static>(&self) -> Option<&T> {
        self.behavior.as_ref().as_any().downcast_ref::<T>()
    }

    /// Downcast the behavior to its concrete type, mutably.
    pub fn downcast_mut<T: Behavior + 'static>(&mut self) -> Option<&mut T> {
        self.behavior.as_mut().as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("type", &self.type_name)
            .field("base_type", &self.base_type)
            .field("active", &self.active)
            .field("lock_one_tick", &self.lock_one_tick)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}
