//! Engine-agnostic primitives for the arbor behavior-tree engine.
//!
//! Nodes never hold a pointer to their blackboard. The owning tree lends it by
//! `&mut` to every [`BehaviorNode::tick`] call, so every node in one tree observes
//! the same store regardless of the order the tree was assembled in.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod math;
pub mod node;
pub mod status;
pub mod tick;

pub use blackboard::{Blackboard, BlackboardValue};
pub use math::Vec3;
pub use node::BehaviorNode;
pub use status::NodeStatus;
pub use tick::TickContext;
