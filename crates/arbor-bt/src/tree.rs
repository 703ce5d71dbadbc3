use arbor_core::{BehaviorNode, Blackboard, NodeStatus, TickContext};
use arbor_tools::{TraceEvent, TraceSink};

/// Owns one root node and one blackboard for a tree's lifetime.
///
/// Call [`tick`](BehaviorTree::tick) once per simulation step. When the root
/// reports a terminal status the tree resets the root in the same tick, so the
/// next call starts a fresh evaluation pass.
///
/// ```
/// use arbor_bt::{ActionNode, BehaviorTree, ConditionNode, NodeStatus, Sequence};
///
/// let root = Sequence::new(vec![
///     Box::new(ConditionNode::new("alert", |bb| bb.get("alert", false))),
///     Box::new(ActionNode::new("shout", |bb, _dt| {
///         bb.set("shouted", true);
///         NodeStatus::Success
///     })),
/// ]);
///
/// let mut tree = BehaviorTree::new(Box::new(root));
/// assert_eq!(tree.tick(0.016), Some(NodeStatus::Failure));
///
/// tree.blackboard_mut().set("alert", true);
/// assert_eq!(tree.tick(0.016), Some(NodeStatus::Success));
/// assert!(tree.blackboard().get("shouted", false));
/// ```
#[derive(Default)]
pub struct BehaviorTree {
    driver: Driver,
    blackboard: Blackboard,
    tick: u64,
}

#[derive(Default)]
struct Driver {
    root: Option<Box<dyn BehaviorNode>>,
    last: Option<NodeStatus>,
    trace: Option<Box<dyn TraceSink>>,
}

impl std::fmt::Debug for BehaviorTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("root", &self.driver.root.as_ref().map(|root| root.name()))
            .field("last", &self.driver.last)
            .field("tick", &self.tick)
            .field("blackboard", &self.blackboard)
            .finish()
    }
}

impl Driver {
    fn step(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> Option<NodeStatus> {
        let root = self.root.as_mut()?;
        let status = root.tick(ctx, blackboard);
        if status.is_terminal() {
            tracing::debug!(
                root = root.name(),
                tick = ctx.tick,
                %status,
                "root finished; resetting"
            );
            root.reset();
        }

        self.last = Some(status);
        if let Some(sink) = self.trace.as_mut() {
            sink.emit(TraceEvent::new(ctx.tick, "tree.tick").with_status(status));
        }
        Some(status)
    }

    fn reset_root(&mut self, tick: u64) {
        self.last = None;
        if let Some(root) = self.root.as_mut() {
            root.reset();
        }
        if let Some(sink) = self.trace.as_mut() {
            sink.emit(TraceEvent::new(tick, "tree.reset"));
        }
    }
}

impl BehaviorTree {
    pub fn new(root: Box<dyn BehaviorNode>) -> Self {
        Self {
            driver: Driver {
                root: Some(root),
                ..Driver::default()
            },
            ..Self::default()
        }
    }

    /// A tree with no root; ticking it is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_blackboard(mut self, blackboard: Blackboard) -> Self {
        self.blackboard = blackboard;
        self
    }

    /// Streams `tree.tick` and `tree.reset` events into `sink`.
    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.driver.trace = Some(sink);
        self
    }

    /// Installs a new root, returning the previous one.
    pub fn set_root(&mut self, root: Box<dyn BehaviorNode>) -> Option<Box<dyn BehaviorNode>> {
        self.driver.last = None;
        self.driver.root.replace(root)
    }

    pub fn root(&self) -> Option<&dyn BehaviorNode> {
        self.driver.root.as_deref()
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    /// Write access for producers outside the tree (perception, navigation).
    /// Writes made between ticks are observed by the next tick.
    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    /// Root status returned by the most recent tick.
    pub fn last_status(&self) -> Option<NodeStatus> {
        self.driver.last
    }

    /// Number of [`tick`](Self::tick) calls made so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Runs one evaluation step with `dt_seconds` of elapsed time.
    ///
    /// Returns the root status, or `None` when the tree has no root.
    pub fn tick(&mut self, dt_seconds: f32) -> Option<NodeStatus> {
        let ctx = TickContext::new(self.tick, dt_seconds);
        self.tick = self.tick.wrapping_add(1);
        self.driver.step(&ctx, &mut self.blackboard)
    }

    /// Runs one step with a caller-provided context against this tree's own
    /// blackboard.
    ///
    /// The step still counts towards [`tick_count`](Self::tick_count), but
    /// nodes and trace events see `ctx.tick`, not this tree's own counter.
    pub fn tick_in_context(&mut self, ctx: &TickContext) -> Option<NodeStatus> {
        self.tick = self.tick.wrapping_add(1);
        self.driver.step(ctx, &mut self.blackboard)
    }

    /// Runs one step against a caller-provided blackboard, leaving this tree's
    /// own blackboard untouched. Counted like
    /// [`tick_in_context`](Self::tick_in_context).
    pub fn tick_with_blackboard(
        &mut self,
        ctx: &TickContext,
        blackboard: &mut Blackboard,
    ) -> Option<NodeStatus> {
        self.tick = self.tick.wrapping_add(1);
        self.driver.step(ctx, blackboard)
    }

    /// Abandons any in-progress pass and clears the blackboard.
    pub fn reset(&mut self) {
        tracing::debug!(tick = self.tick, "behavior tree reset");
        self.driver.reset_root(self.tick);
        self.blackboard.clear();
    }

    /// Abandons any in-progress pass, keeping the blackboard.
    pub fn reset_root(&mut self) {
        self.driver.reset_root(self.tick);
    }
}
