//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of writing `Box::new(Sequence::new(vec![...]))`, use
//! `sequence(vec![...])`. Every helper returns a boxed node ready to be placed
//! under a parent or handed to a [`BehaviorTree`](crate::BehaviorTree).

use std::borrow::Cow;

use arbor_core::{BehaviorNode, Blackboard, NodeStatus};

use crate::{
    ActionNode, BehaviorTree, ConditionNode, Inverter, MemSelector, MemSequence, Parallel,
    ParallelPolicy, Repeater, Selector, Sequence, SubtreeNode, Succeeder, Timer,
};

pub type Node = Box<dyn BehaviorNode>;

#[inline]
pub fn sequence(children: Vec<Node>) -> Node {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector(children: Vec<Node>) -> Node {
    Box::new(Selector::new(children))
}

#[inline]
pub fn mem_sequence(children: Vec<Node>) -> Node {
    Box::new(MemSequence::new(children))
}

#[inline]
pub fn mem_selector(children: Vec<Node>) -> Node {
    Box::new(MemSelector::new(children))
}

#[inline]
pub fn parallel(success: ParallelPolicy, failure: ParallelPolicy, children: Vec<Node>) -> Node {
    Box::new(Parallel::new(success, failure, children))
}

#[inline]
pub fn inverter(child: Node) -> Node {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn succeeder(child: Node) -> Node {
    Box::new(Succeeder::new(child))
}

#[inline]
pub fn repeat(limit: u32, child: Node) -> Node {
    Box::new(Repeater::new(child, limit))
}

#[inline]
pub fn repeat_forever(child: Node) -> Node {
    Box::new(Repeater::forever(child))
}

#[inline]
pub fn timer(duration: f32, child: Node) -> Node {
    Box::new(Timer::new(child, duration))
}

#[inline]
pub fn condition(
    name: impl Into<Cow<'static, str>>,
    predicate: impl FnMut(&Blackboard) -> bool + 'static,
) -> Node {
    Box::new(ConditionNode::new(name, predicate))
}

#[inline]
pub fn action(
    name: impl Into<Cow<'static, str>>,
    action: impl FnMut(&mut Blackboard, f32) -> NodeStatus + 'static,
) -> Node {
    Box::new(ActionNode::new(name, action))
}

/// A condition reading a `bool` key, absent counting as `false`.
pub fn flag(key: &'static str) -> Node {
    condition(key, move |bb| bb.get(key, false))
}

#[inline]
pub fn subtree(tree: BehaviorTree) -> Node {
    Box::new(SubtreeNode::new(tree))
}
