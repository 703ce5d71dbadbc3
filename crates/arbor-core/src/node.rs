use crate::{Blackboard, NodeStatus, TickContext};

/// A node of a behavior tree.
///
/// Nodes are built once when the tree is assembled and persist for the tree's
/// lifetime, which is what lets decorators and composites carry continuation
/// state (counters, timers, per-child slots) from one tick to the next.
///
/// # Contract
///
/// - `tick` may be called repeatedly while the node returns
///   [`NodeStatus::Running`].
/// - Once `tick` has returned a terminal status, the caller must call
///   [`reset`](BehaviorNode::reset) before ticking the node again in a new pass.
///   This precondition is not checked; which semantics apply when it is violated
///   is unspecified.
/// - `reset` restores the node and every descendant to its pre-tick state. It
///   must not panic and may be called at any time, including mid-pass, to
///   abandon an in-progress subtree.
pub trait BehaviorNode: 'static {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus;

    fn reset(&mut self);

    /// Display name, used by traces and tooling.
    fn name(&self) -> &str;

    /// Status returned by the most recent `tick`, or `None` if the node has not
    /// been ticked since construction or the last `reset`.
    fn status(&self) -> Option<NodeStatus>;

    /// Calls `f` once per direct child, in evaluation order.
    fn visit_children(&self, _f: &mut dyn FnMut(&dyn BehaviorNode)) {}
}

impl BehaviorNode for Box<dyn BehaviorNode> {
    #[inline]
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        (**self).tick(ctx, blackboard)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn status(&self) -> Option<NodeStatus> {
        (**self).status()
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        (**self).visit_children(f)
    }
}
