use std::borrow::Cow;

use arbor_core::{BehaviorNode, Blackboard, NodeStatus, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Completion quorum for one outcome of a [`Parallel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParallelPolicy {
    /// At least one child reached the outcome.
    RequireOne,
    /// Every child reached the outcome.
    RequireAll,
}

impl ParallelPolicy {
    fn is_met(self, count: usize, total: usize) -> bool {
        match self {
            ParallelPolicy::RequireOne => count >= 1,
            ParallelPolicy::RequireAll => count == total,
        }
    }
}

/// Ticks all children "at once" and completes on a configurable quorum.
///
/// One status slot per child persists across ticks. Each tick only children
/// whose slot is still `Running` are ticked; children that resolved earlier in
/// the pass are left alone. The success policy is checked first, then the
/// failure policy; the first one met resets every child and slot and decides the
/// result. Otherwise the parallel keeps `Running`. An empty parallel succeeds.
///
/// Note that some policy pairs can settle every child without meeting either
/// quorum (for example `RequireAll` / `RequireAll` with mixed outcomes). The node
/// then reports `Running` until it is reset from above.
pub struct Parallel {
    name: Cow<'static, str>,
    children: Vec<Box<dyn BehaviorNode>>,
    slots: Vec<NodeStatus>,
    success_policy: ParallelPolicy,
    failure_policy: ParallelPolicy,
    stalled: bool,
    status: Option<NodeStatus>,
}

impl Parallel {
    pub fn new(
        success_policy: ParallelPolicy,
        failure_policy: ParallelPolicy,
        children: Vec<Box<dyn BehaviorNode>>,
    ) -> Self {
        let slots = vec![NodeStatus::Running; children.len()];
        Self {
            name: Cow::Borrowed("Parallel"),
            children,
            slots,
            success_policy,
            failure_policy,
            stalled: false,
            status: None,
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn push(&mut self, child: Box<dyn BehaviorNode>) {
        self.children.push(child);
        self.slots.push(NodeStatus::Running);
    }

    pub fn with_child(mut self, child: Box<dyn BehaviorNode>) -> Self {
        self.push(child);
        self
    }

    pub fn success_policy(&self) -> ParallelPolicy {
        self.success_policy
    }

    pub fn failure_policy(&self) -> ParallelPolicy {
        self.failure_policy
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn reset_children(&mut self) {
        for (child, slot) in self.children.iter_mut().zip(self.slots.iter_mut()) {
            child.reset();
            *slot = NodeStatus::Running;
        }
        self.stalled = false;
    }

    fn step(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let total = self.children.len();
        if total == 0 {
            return NodeStatus::Success;
        }

        for (child, slot) in self.children.iter_mut().zip(self.slots.iter_mut()) {
            if slot.is_running() {
                *slot = child.tick(ctx, blackboard);
            }
        }

        let successes = self.slots.iter().filter(|s| s.is_success()).count();
        let failures = self.slots.iter().filter(|s| s.is_failure()).count();

        if self.success_policy.is_met(successes, total) {
            self.reset_children();
            return NodeStatus::Success;
        }
        if self.failure_policy.is_met(failures, total) {
            self.reset_children();
            return NodeStatus::Failure;
        }

        if successes + failures == total && !self.stalled {
            self.stalled = true;
            tracing::warn!(
                node = %self.name,
                successes,
                failures,
                "parallel settled every child without meeting a quorum"
            );
        }
        NodeStatus::Running
    }
}

impl BehaviorNode for Parallel {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let status = self.step(ctx, blackboard);
        if status.is_terminal() {
            tracing::trace!(node = %self.name, %status, "parallel finished");
        }
        self.status = Some(status);
        status
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
