//! Component tree: nodes, behaviors, the arena and the update cascade.
//!
//! A component is a named, typed node. Its concrete logic lives in a boxed
//! `Behavior`; its place in the tree (parent, ordered children) lives in the
//! `ComponentArena`. Effective activity is the conjunction of the node's
//! own flag and every ancestor's, recomputed on demand.

mod arena;
mod behavior;
mod cascade;
mod node;

pub use arena::ComponentArena;
pub use behavior::{AsAny, Behavior, EmptyBehavior, HookContext};
pub use cascade::Phase;
pub use node::{ChildList, Component};

pub(crate) use cascade::run_phase;
