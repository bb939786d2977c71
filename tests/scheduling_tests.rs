//! Tick dispatch integration tests: groups, phases, locks and deferred
//! commands.

mod common;

use std::sync::{Arc, Mutex};

use common::{clear, count, entries, fixture, Fixture};
use rust_component_tree::component::{Behavior, HookContext};
use rust_component_tree::core::{ComponentError, OwnerConfig, TypeConfig};
use rust_component_tree::factory::{FactoryManager, FnFactory};
use rust_component_tree::logging;
use rust_component_tree::owner::{ComponentCommand, ComponentOwner, LifecycleEvent};

fn tick(owner: &mut ComponentOwner) {
    owner.update_pre_components(0.016);
    owner.update_components(0.016);
}

// =============================================================================
// Phases and groups
// =============================================================================

/// Every pre-update root finishes all three phases before any regular root
/// starts.
#[test]
fn test_pre_group_completes_first() {
    let Fixture { mut owner, hooks, .. } = fixture();
    owner.add_component("R", "T1").unwrap();
    owner.add_component("E", "Early").unwrap();
    clear(&hooks);

    tick(&mut owner);

    assert_eq!(
        entries(&hooks),
        vec!["E:pre", "E:update", "E:late", "R:pre", "R:update", "R:late"]
    );
}

/// Children run depth-first after their parent, within each phase.
#[test]
fn test_cascade_is_depth_first() {
    let Fixture { mut owner, hooks, .. } = fixture();
    let a = owner.add_component("A", "T1").unwrap();
    let b = owner.add_component("B", "T1").unwrap();
    let c = owner.add_component("C", "T1").unwrap();
    let d = owner.add_component("D", "T1").unwrap();
    owner.add_child(a, b).unwrap();
    owner.add_child(b, c).unwrap();
    owner.add_child(a, d).unwrap();
    clear(&hooks);

    owner.update_components(0.016);

    let updates: Vec<_> = entries(&hooks).into_iter().filter(|e| e.ends_with(":update")).collect();
    assert_eq!(updates, vec!["A:update", "B:update", "C:update", "D:update"]);
}

/// A child's group does not matter; only the root's type decides the pass.
#[test]
fn test_child_follows_root_group() {
    let Fixture { mut owner, hooks, .. } = fixture();
    let e = owner.add_component("E", "Early").unwrap();
    let r = owner.add_component("R", "T1").unwrap();
    owner.add_child(e, r).unwrap();
    clear(&hooks);

    owner.update_pre_components(0.016);
    assert_eq!(count(&hooks, "R:update"), 1);

    owner.update_components(0.016);
    assert_eq!(count(&hooks, "R:update"), 1);
}

/// Inactive subtrees are skipped; reactivating restores them.
#[test]
fn test_inactive_subtree_skipped() {
    let Fixture { mut owner, hooks, .. } = fixture();
    let a = owner.add_component("A", "T1").unwrap();
    let b = owner.add_component("B", "T1").unwrap();
    let c = owner.add_component("C", "T1").unwrap();
    owner.add_child(a, b).unwrap();
    owner.add_child(b, c).unwrap();
    owner.set_active(b, false).unwrap();
    clear(&hooks);

    tick(&mut owner);
    assert_eq!(count(&hooks, "A:update"), 1);
    assert_eq!(count(&hooks, "B:update"), 0);
    assert_eq!(count(&hooks, "C:update"), 0);

    owner.set_active(b, true).unwrap();
    tick(&mut owner);
    assert_eq!(count(&hooks, "C:update"), 1);
}

// =============================================================================
// One-tick lock
// =============================================================================

/// Locking A skips A, B and C for exactly one tick, with no manual unlock.
#[test]
fn test_lock_one_tick_skips_descendants_once() {
    let Fixture { mut owner, hooks, .. } = fixture();
    let a = owner.add_component("A", "T1").unwrap();
    let b = owner.add_component("B", "T1").unwrap();
    let c = owner.add_component("C", "T1").unwrap();
    owner.add_child(a, b).unwrap();
    owner.add_child(b, c).unwrap();
    clear(&hooks);

    owner.set_lock_one_tick(a, true).unwrap();
    assert_eq!(owner.get_first_active_component("T1"), Some(b));
    tick(&mut owner);

    for name in ["A", "B", "C"] {
        assert_eq!(count(&hooks, &format!("{name}:pre")), 0, "{name} pre");
        assert_eq!(count(&hooks, &format!("{name}:update")), 0, "{name} update");
    }
    assert!(!owner.component(a).unwrap().is_locked_one_tick());

    clear(&hooks);
    tick(&mut owner);
    for name in ["A", "B", "C"] {
        assert_eq!(count(&hooks, &format!("{name}:pre")), 1, "{name} pre");
        assert_eq!(count(&hooks, &format!("{name}:update")), 1, "{name} update");
        assert_eq!(count(&hooks, &format!("{name}:late")), 1, "{name} late");
    }
}

/// A locked child is skipped with its subtree while its siblings run.
#[test]
fn test_lock_on_child() {
    let Fixture { mut owner, hooks, .. } = fixture();
    let a = owner.add_component("A", "T1").unwrap();
    let b = owner.add_component("B", "T1").unwrap();
    let c = owner.add_component("C", "T1").unwrap();
    owner.add_child(a, b).unwrap();
    owner.add_child(a, c).unwrap();
    owner.set_lock_one_tick(b, true).unwrap();
    clear(&hooks);

    owner.update_components(0.016);
    assert_eq!(count(&hooks, "A:update"), 1);
    assert_eq!(count(&hooks, "B:update"), 0);
    assert_eq!(count(&hooks, "C:update"), 1);
    assert!(!owner.component(b).unwrap().is_locked_one_tick());
}

// =============================================================================
// Deferred commands
// =============================================================================

/// Spawns a child on its first update and renames itself on the second.
struct Spawner {
    ticks: u32,
}

impl Behavior for Spawner {
    fn update(&mut self, ctx: &mut HookContext<'_>, _dt: f32) {
        self.ticks += 1;
        match self.ticks {
            1 => ctx.defer(ComponentCommand::Add {
                name: format!("{}-child", ctx.name()),
                type_name: "Leaf".into(),
                parent: Some(ctx.id()),
            }),
            2 => ctx.defer(ComponentCommand::Rename {
                id: ctx.id(),
                name: "renamed".into(),
            }),
            _ => {}
        }
    }
}

/// Counts its own updates into a shared cell.
struct Leaf {
    updates: Arc<Mutex<u32>>,
}

impl Behavior for Leaf {
    fn update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {
        *self.updates.lock().unwrap() += 1;
    }
}

fn spawner_owner(updates: &Arc<Mutex<u32>>) -> ComponentOwner {
    logging::init_for_tests();

    let mut factories = FactoryManager::new();
    factories
        .register(
            TypeConfig::new("Spawner"),
            FnFactory::new(|_: &str| Box::new(Spawner { ticks: 0 }) as Box<dyn Behavior>),
        )
        .unwrap();
    let updates = updates.clone();
    factories
        .register(
            TypeConfig::new("Leaf"),
            FnFactory::new(move |_: &str| Box::new(Leaf { updates: updates.clone() }) as Box<dyn Behavior>),
        )
        .unwrap();
    ComponentOwner::new(OwnerConfig::new("spawner").with_event_recording(true), Arc::new(factories))
}

/// Structural changes requested by hooks land after the pass.
#[test]
fn test_hook_commands_applied_after_pass() {
    let updates = Arc::new(Mutex::new(0));
    let mut owner = spawner_owner(&updates);
    let s = owner.add_component("s", "Spawner").unwrap();

    owner.update_components(0.016);
    let child = owner.find("s-child").expect("spawned child");
    assert_eq!(owner.parent(child), Some(s));
    // Created after the pass, so it has not been updated yet.
    assert_eq!(*updates.lock().unwrap(), 0);
    assert_eq!(owner.pending_commands(), 0);

    owner.update_components(0.016);
    assert_eq!(*updates.lock().unwrap(), 1);
    assert_eq!(owner.find("renamed"), Some(s));
    assert_eq!(owner.child_by_name(s, "s-child"), Some(child));
}

/// Deferred failures are reported without stopping later commands.
#[test]
fn test_apply_deferred_collects_errors() {
    let updates = Arc::new(Mutex::new(0));
    let mut owner = spawner_owner(&updates);
    let s = owner.add_component("s", "Spawner").unwrap();
    owner.drain_events();

    owner.defer(ComponentCommand::Add { name: "s".into(), type_name: "Leaf".into(), parent: None });
    owner.defer(ComponentCommand::DestroyByName("ghost".into()));
    owner.defer(ComponentCommand::SetActive { id: s, active: false });
    owner.defer(ComponentCommand::Add { name: "leaf".into(), type_name: "Leaf".into(), parent: None });

    let errors = owner.apply_deferred();

    assert_eq!(
        errors,
        vec![
            ComponentError::DuplicateName("s".into()),
            ComponentError::NameNotFound("ghost".into()),
        ]
    );
    assert!(!owner.is_active(s));
    assert!(owner.find("leaf").is_some());
    assert_eq!(
        owner.drain_events(),
        vec![LifecycleEvent::Added { name: "leaf".into(), type_name: "Leaf".into() }]
    );
}

/// A hook destroying its own parent mid-pass does not disturb the walk.
#[test]
fn test_destroy_parent_from_child_hook() {
    struct Orphaner;

    impl Behavior for Orphaner {
        fn update(&mut self, ctx: &mut HookContext<'_>, _dt: f32) {
            ctx.defer(ComponentCommand::DestroyByName("A".into()));
        }
    }

    logging::init_for_tests();
    let hooks = common::journal();
    let destroyed = common::journal();
    let mut factories = FactoryManager::new();
    factories
        .register(TypeConfig::new("T1"), common::RecordingFactory::new(&hooks, &destroyed))
        .unwrap();
    factories
        .register(
            TypeConfig::new("Orphaner"),
            FnFactory::new(|_: &str| Box::new(Orphaner) as Box<dyn Behavior>),
        )
        .unwrap();
    let mut owner = ComponentOwner::new(OwnerConfig::new("orphan"), Arc::new(factories));

    let a = owner.add_component("A", "T1").unwrap();
    let b = owner.add_component("B", "Orphaner").unwrap();
    owner.add_child(a, b).unwrap();

    owner.update_components(0.016);

    assert_eq!(count(&hooks, "A:late"), 1);
    assert_eq!(count(&hooks, "A:on_destroy(A)"), 1);
    assert_eq!(entries(&destroyed), vec!["A"]);
    assert!(!owner.contains(b));
    assert!(owner.is_empty());
}
