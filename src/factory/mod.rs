//! Component factories and the type table.
//!
//! Games register one factory per component type. The `FactoryManager`
//! interns the type name into a `ComponentType` and keeps, per type, the
//! factory, the base type and the scheduling group. All of that is resolved
//! once at registration; the update pass never compares type strings.

mod manager;

pub use manager::{FactoryManager, TypeEntry};

use crate::component::{Behavior, Component};

/// Builds and disposes of one concrete component kind.
///
/// ## Example
///
/// ```
/// use rust_component_tree::component::{Behavior, EmptyBehavior};
/// use rust_component_tree::factory::ComponentFactory;
///
/// struct GroupFactory;
///
/// impl ComponentFactory for GroupFactory {
///     fn create_component(&self, _name: &str) -> Box<dyn Behavior> {
///         Box::new(EmptyBehavior)
///     }
/// }
/// ```
pub trait ComponentFactory: Send + Sync {
    /// Build the behavior for a new component called `name`.
    fn create_component(&self, name: &str) -> Box<dyn Behavior>;

    /// Dispose of a component that has been fully unlinked and unindexed.
    ///
    /// The default just drops it. Pooling factories can reclaim the
    /// behavior here.
    fn destroy_component(&self, component: Component) {
        drop(component);
    }
}

/// Factory that builds `T::default()`.
#[derive(Debug)]
pub struct DefaultFactory<T> {
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> DefaultFactory<T> {
    /// Create the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> Default for DefaultFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Behavior + Default + 'static> ComponentFactory for DefaultFactory<T> {
    fn create_component(&self, _name: &str) -> Box<dyn Behavior> {
        Box::new(T::default())
    }
}

/// Factory backed by a closure.
pub struct FnFactory<F> {
    create: F,
}

impl<F> FnFactory<F>
where
    F: Fn(&str) -> Box<dyn Behavior> + Send + Sync,
{
    /// Wrap a constructor closure.
    pub fn new(create: F) -> Self {
        Self { create }
    }
}

impl<F> ComponentFactory for FnFactory<F>
where
    F: Fn(&str) -> Box<dyn Behavior> + Send + Sync,
{
    fn create_component(&self, name: &str) -> Box<dyn Behavior> {
        (self.create)(name)
    }
}
