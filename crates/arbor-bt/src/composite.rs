//! Ordered composites.
//!
//! [`Sequence`] and [`Selector`] walk their children from index 0 on every tick
//! and keep no cursor. A child that returned `Running` last tick is reached
//! again by re-walking the children before it, which are ticked again even if
//! they already resolved earlier in the same pass. Composites only force a reset
//! of their children when they themselves complete.
//!
//! [`MemSequence`] and [`MemSelector`] remember the index of the running child
//! and resume there, skipping the children that already resolved.

use std::borrow::Cow;

use arbor_core::{BehaviorNode, Blackboard, NodeStatus, TickContext};

macro_rules! composite_common {
    ($ty:ident, $default_name:literal) => {
        impl $ty {
            pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> Self {
                Self {
                    children,
                    ..Self::empty()
                }
            }

            pub fn empty() -> Self {
                Self {
                    name: Cow::Borrowed($default_name),
                    children: Vec::new(),
                    ..Default::default()
                }
            }

            pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
                self.name = name.into();
                self
            }

            /// Appends a child; insertion order is evaluation order.
            pub fn push(&mut self, child: Box<dyn BehaviorNode>) {
                self.children.push(child);
            }

            pub fn with_child(mut self, child: Box<dyn BehaviorNode>) -> Self {
                self.push(child);
                self
            }

            pub fn len(&self) -> usize {
                self.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }

            fn reset_children(&mut self) {
                for child in self.children.iter_mut() {
                    child.reset();
                }
            }

            fn finish(&mut self, status: NodeStatus) -> NodeStatus {
                if status.is_terminal() {
                    tracing::trace!(node = %self.name, %status, "composite finished");
                }
                self.status = Some(status);
                status
            }
        }
    };
}

/// Ordered conjunction: succeeds when every child succeeds, in order.
///
/// Each tick walks the children from the first one. The first `Failure` resets
/// all children and fails the sequence; the first `Running` is returned
/// immediately; if every child succeeds, all children are reset and the
/// sequence succeeds. An empty sequence succeeds.
#[derive(Default)]
pub struct Sequence {
    name: Cow<'static, str>,
    children: Vec<Box<dyn BehaviorNode>>,
    status: Option<NodeStatus>,
}

composite_common!(Sequence, "Sequence");

impl BehaviorNode for Sequence {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        for child in self.children.iter_mut() {
            match child.tick(ctx, blackboard) {
                NodeStatus::Success => continue,
                NodeStatus::Running => return self.finish(NodeStatus::Running),
                NodeStatus::Failure => {
                    self.reset_children();
                    return self.finish(NodeStatus::Failure);
                }
            }
        }

        self.reset_children();
        self.finish(NodeStatus::Success)
    }

    fn reset(&mut self) {
        self.status = None;
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}

/// Ordered fallback: the first child to succeed wins.
///
/// Each tick walks the children from the first one. The first `Success` resets
/// all children and succeeds; the first `Running` is returned immediately
/// without resetting the children before it; `Failure` moves on to the next
/// child. When every child fails the selector fails without forcing a reset
/// (each child already settled its own state). An empty selector fails.
#[derive(Default)]
pub struct Selector {
    name: Cow<'static, str>,
    children: Vec<Box<dyn BehaviorNode>>,
    status: Option<NodeStatus>,
}

composite_common!(Selector, "Selector");

impl BehaviorNode for Selector {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        for child in self.children.iter_mut() {
            match child.tick(ctx, blackboard) {
                NodeStatus::Failure => continue,
                NodeStatus::Running => return self.finish(NodeStatus::Running),
                NodeStatus::Success => {
                    self.reset_children();
                    return self.finish(NodeStatus::Success);
                }
            }
        }

        self.finish(NodeStatus::Failure)
    }

    fn reset(&mut self) {
        self.status = None;
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}

/// Sequence that resumes at the running child instead of re-walking from the
/// first one.
#[derive(Default)]
pub struct MemSequence {
    name: Cow<'static, str>,
    children: Vec<Box<dyn BehaviorNode>>,
    index: usize,
    status: Option<NodeStatus>,
}

composite_common!(MemSequence, "MemSequence");

impl BehaviorNode for MemSequence {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        while self.index < self.children.len() {
            let status = self.children[self.index].tick(ctx, blackboard);
            match status {
                NodeStatus::Running => return self.finish(NodeStatus::Running),
                NodeStatus::Failure => {
                    self.index = 0;
                    self.reset_children();
                    return self.finish(NodeStatus::Failure);
                }
                NodeStatus::Success => self.index += 1,
            }
        }

        self.index = 0;
        self.reset_children();
        self.finish(NodeStatus::Success)
    }

    fn reset(&mut self) {
        self.status = None;
        self.index = 0;
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}

/// Selector that resumes at the running child instead of re-checking the
/// children before it.
#[derive(Default)]
pub struct MemSelector {
    name: Cow<'static, str>,
    children: Vec<Box<dyn BehaviorNode>>,
    index: usize,
    status: Option<NodeStatus>,
}

composite_common!(MemSelector, "MemSelector");

impl BehaviorNode for MemSelector {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        while self.index < self.children.len() {
            let status = self.children[self.index].tick(ctx, blackboard);
            match status {
                NodeStatus::Running => return self.finish(NodeStatus::Running),
                NodeStatus::Success => {
                    self.index = 0;
                    self.reset_children();
                    return self.finish(NodeStatus::Success);
                }
                NodeStatus::Failure => self.index += 1,
            }
        }

        self.index = 0;
        self.reset_children();
        self.finish(NodeStatus::Failure)
    }

    fn reset(&mut self) {
        self.status = None;
        self.index = 0;
        self.reset_children();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}
