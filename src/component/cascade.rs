//! Per-node update cascade.
//!
//! Each phase visits a component, runs its hook, then recurses into its
//! children in list order. A component that is locked for one tick (or
//! effectively inactive) returns before its hook, so its whole subtree is
//! skipped. The lock is consumed by the lateUpdate visit of the same tick.

use super::arena::ComponentArena;
use super::behavior::HookContext;
use crate::core::ComponentId;
use crate::owner::CommandQueue;

/// One of the three ordered steps of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// First step.
    PreUpdate,
    /// Second step.
    Update,
    /// Third step. Clears one-tick locks.
    LateUpdate,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 3] = [Phase::PreUpdate, Phase::Update, Phase::LateUpdate];
}

/// Run `phase` on `id` and its subtree.
pub(crate) fn run_phase(
    arena: &mut ComponentArena,
    commands: &mut CommandQueue,
    id: ComponentId,
    phase: Phase,
    dt: f32,
) {
    match arena.get_mut(id) {
        Some(node) if node.lock_one_tick => {
            if phase == Phase::LateUpdate {
                node.lock_one_tick = false;
            }
            return;
        }
        Some(_) => {}
        None => return,
    }
    if !arena.is_active(id) {
        return;
    }

    let Some(node) = arena.get_mut(id) else {
        return;
    };
    {
        let mut ctx = HookContext::new(id, &node.name, commands);
        match phase {
            Phase::PreUpdate => node.behavior.pre_update(&mut ctx, dt),
            Phase::Update => node.behavior.update(&mut ctx, dt),
            Phase::LateUpdate => node.behavior.late_update(&mut ctx, dt),
        }
    }

    for child in arena.children_snapshot(id) {
        run_phase(arena, commands, child, phase, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Behavior, Component};
    use crate::core::{ComponentType, UpdateGroup};

    #[derive(Default)]
    struct Counter {
        pre: u32,
        update: u32,
        late: u32,
    }

    impl Behavior for Counter {
        fn pre_update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {
            self.pre += 1;
        }
        fn update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {
            self.update += 1;
        }
        fn late_update(&mut self, _ctx: &mut HookContext<'_>, _dt: f32) {
            self.late += 1;
        }
    }

    fn counter(name: &str) -> Component {
        Component::new(
            name,
            ComponentType::new(0),
            "Counter",
            "",
            UpdateGroup::Regular,
            Box::new(Counter::default()),
        )
    }

    fn counts(arena: &ComponentArena, id: ComponentId) -> (u32, u32, u32) {
        let c = arena[id].downcast_ref::<Counter>().unwrap();
        (c.pre, c.update, c.late)
    }

    fn tick(arena: &mut ComponentArena, queue: &mut CommandQueue, root: ComponentId) {
        for phase in Phase::ALL {
            run_phase(arena, queue, root, phase, 0.016);
        }
    }

    #[test]
    fn test_cascade_reaches_descendants() {
        let mut arena = ComponentArena::new();
        let mut queue = CommandQueue::new();
        let a = arena.insert(counter("a"));
        let b = arena.insert(counter("b"));
        arena.link_child(a, b).unwrap();

        tick(&mut arena, &mut queue, a);
        assert_eq!(counts(&arena, a), (1, 1, 1));
        assert_eq!(counts(&arena, b), (1, 1, 1));
    }

    #[test]
    fn test_lock_skips_subtree_for_one_tick() {
        let mut arena = ComponentArena::new();
        let mut queue = CommandQueue::new();
        let a = arena.insert(counter("a"));
        let b = arena.insert(counter("b"));
        arena.link_child(a, b).unwrap();

        arena.get_mut(a).unwrap().set_lock_one_tick(true);
        tick(&mut arena, &mut queue, a);
        assert_eq!(counts(&arena, a), (0, 0, 0));
        assert_eq!(counts(&arena, b), (0, 0, 0));
        assert!(!arena[a].is_locked_one_tick());

        tick(&mut arena, &mut queue, a);
        assert_eq!(counts(&arena, a), (1, 1, 1));
        assert_eq!(counts(&arena, b), (1, 1, 1));
    }

    #[test]
    fn test_inactive_child_is_skipped() {
        let mut arena = ComponentArena::new();
        let mut queue = CommandQueue::new();
        let a = arena.insert(counter("a"));
        let b = arena.insert(counter("b"));
        arena.link_child(a, b).unwrap();
        arena.get_mut(b).unwrap().set_active(false);

        tick(&mut arena, &mut queue, a);
        assert_eq!(counts(&arena, a), (1, 1, 1));
        assert_eq!(counts(&arena, b), (0, 0, 0));
    }

    #[test]
    fn test_locked_child_keeps_lock_until_late_update() {
        let mut arena = ComponentArena::new();
        let mut queue = CommandQueue::new();
        let a = arena.insert(counter("a"));
        let b = arena.insert(counter("b"));
        arena.link_child(a, b).unwrap();
        arena.get_mut(b).unwrap().set_lock_one_tick(true);

        run_phase(&mut arena, &mut queue, a, Phase::PreUpdate, 0.0);
        run_phase(&mut arena, &mut queue, a, Phase::Update, 0.0);
        assert!(arena[b].is_locked_one_tick());

        run_phase(&mut arena, &mut queue, a, Phase::LateUpdate, 0.0);
        assert!(!arena[b].is_locked_one_tick());
        assert_eq!(counts(&arena, a), (1, 1, 1));
        assert_eq!(counts(&arena, b), (0, 0, 0));
    }
}
