//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rust_component_tree::component::{Behavior, Component, HookContext};
use rust_component_tree::core::{OwnerConfig, TypeConfig};
use rust_component_tree::factory::{ComponentFactory, FactoryManager};
use rust_component_tree::logging;
use rust_component_tree::owner::ComponentOwner;

/// Shared, ordered record of what happened.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

pub fn clear(journal: &Journal) {
    journal.lock().unwrap().clear();
}

/// Count entries for one component, e.g. `count(&j, "B:update")`.
pub fn count(journal: &Journal, entry: &str) -> usize {
    journal.lock().unwrap().iter().filter(|e| *e == entry).count()
}

/// Writes `name:phase` for every hook call.
pub struct Recorder {
    name: String,
    journal: Journal,
}

impl Behavior for Recorder {
    fn init(&mut self, _ctx: &mut HookContext<'_>) {
        self.write("init");
    }

    fn pre_update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {
        self.write("pre");
    }

    fn update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {
        self.write("update");
    }

    fn late_update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {
        self.write("late");
    }

    fn on_destroy(&mut self, name: &str) {
        self.write(&format!("on_destroy({name})"));
    }
}

impl Recorder {
    fn write(&self, what: &str) {
        self.journal.lock().unwrap().push(format!("{}:{}", self.name, what));
    }
}

/// Builds `Recorder`s for hook calls and writes `destroy:name` when a
/// component is handed back.
pub struct RecordingFactory {
    hooks: Journal,
    destroyed: Journal,
}

impl RecordingFactory {
    pub fn new(hooks: &Journal, destroyed: &Journal) -> Self {
        Self { hooks: hooks.clone(), destroyed: destroyed.clone() }
    }
}

impl ComponentFactory for RecordingFactory {
    fn create_component(&self, name: &str) -> Box<dyn Behavior> {
        Box::new(Recorder { name: name.to_string(), journal: self.hooks.clone() })
    }

    fn destroy_component(&self, component: Component) {
        self.destroyed.lock().unwrap().push(component.name().to_string());
    }
}

/// Owner with recording types:
/// - `T1`, `T2`: regular group, base type `Base`
/// - `Early`: pre-update group, base type `Logic`
pub struct Fixture {
    pub owner: ComponentOwner,
    pub hooks: Journal,
    pub destroyed: Journal,
}

pub fn fixture() -> Fixture {
    logging::init_for_tests();

    let hooks = journal();
    let destroyed = journal();
    let mut factories = FactoryManager::new();
    for config in [
        TypeConfig::new("T1").with_base_type("Base"),
        TypeConfig::new("T2").with_base_type("Base"),
        TypeConfig::new("Early").with_base_type("Logic").pre_update(),
    ] {
        factories
            .register(config, RecordingFactory::new(&hooks, &destroyed))
            .unwrap();
    }

    Fixture {
        owner: ComponentOwner::new(OwnerConfig::new("fixture").with_event_recording(true), Arc::new(factories)),
        hooks,
        destroyed,
    }
}
