//! Behavior tree runtime built on `arbor-core`.
//!
//! A tree is assembled once from boxed [`BehaviorNode`]s and handed to a
//! [`BehaviorTree`], which owns the root and the [`Blackboard`](arbor_core::Blackboard)
//! and is ticked once per simulation step.
//!
//! `Sequence` and `Selector` re-evaluate from their first child on every tick and
//! keep no cursor: continuation lives entirely in the children's own `Running`
//! state. Earlier children that already resolved are ticked again on every pass
//! until the composite completes, so action closures placed under them must
//! tolerate repeat ticks after returning a terminal status. Use `MemSequence` /
//! `MemSelector` to resume at the running child instead.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod parallel;
pub mod subtree;
pub mod tree;

pub use arbor_core::{BehaviorNode, Blackboard, NodeStatus, TickContext};
pub use composite::{MemSelector, MemSequence, Selector, Sequence};
pub use decorator::{Inverter, Repeater, Succeeder, Timer};
pub use leaf::{ActionFn, ActionNode, ConditionFn, ConditionNode};
pub use parallel::{Parallel, ParallelPolicy};
pub use subtree::{BlackboardScope, SubtreeNode, SubtreeReport};
pub use tree::BehaviorTree;
