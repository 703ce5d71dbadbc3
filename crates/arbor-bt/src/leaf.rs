use std::borrow::Cow;

use arbor_core::{BehaviorNode, Blackboard, NodeStatus, TickContext};

/// Predicate bound to a [`ConditionNode`].
pub type ConditionFn = Box<dyn FnMut(&Blackboard) -> bool>;

/// Effect bound to an [`ActionNode`]. Receives the blackboard and `dt_seconds`.
pub type ActionFn = Box<dyn FnMut(&mut Blackboard, f32) -> NodeStatus>;

/// Evaluates a predicate over the blackboard.
///
/// Returns `Success` when the predicate holds and `Failure` otherwise; never
/// `Running`. An unbound condition fails.
pub struct ConditionNode {
    name: Cow<'static, str>,
    predicate: Option<ConditionFn>,
    status: Option<NodeStatus>,
}

impl ConditionNode {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        predicate: impl FnMut(&Blackboard) -> bool + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Some(Box::new(predicate)),
            status: None,
        }
    }

    pub fn unbound(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            predicate: None,
            status: None,
        }
    }

    pub fn bind(&mut self, predicate: impl FnMut(&Blackboard) -> bool + 'static) {
        self.predicate = Some(Box::new(predicate));
    }

    pub fn is_bound(&self) -> bool {
        self.predicate.is_some()
    }
}

impl BehaviorNode for ConditionNode {
    fn tick(&mut self, _ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let status = match self.predicate.as_mut() {
            Some(predicate) => NodeStatus::from_bool(predicate(&*blackboard)),
            None => NodeStatus::Failure,
        };
        self.status = Some(status);
        status
    }

    fn reset(&mut self) {
        self.status = None;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }
}

/// Runs an externally supplied action and reports its status verbatim.
///
/// Multi-tick actions return `Running` until done. Under a `Sequence` or
/// `Selector` an action that already finished may be ticked again in the same
/// pass (those composites re-walk from their first child), so the closure must
/// tolerate repeat calls. An unbound action fails.
pub struct ActionNode {
    name: Cow<'static, str>,
    action: Option<ActionFn>,
    status: Option<NodeStatus>,
}

impl ActionNode {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        action: impl FnMut(&mut Blackboard, f32) -> NodeStatus + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            action: Some(Box::new(action)),
            status: None,
        }
    }

    pub fn unbound(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            action: None,
            status: None,
        }
    }

    pub fn bind(&mut self, action: impl FnMut(&mut Blackboard, f32) -> NodeStatus + 'static) {
        self.action = Some(Box::new(action));
    }

    pub fn is_bound(&self) -> bool {
        self.action.is_some()
    }
}

impl BehaviorNode for ActionNode {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let status = match self.action.as_mut() {
            Some(action) => action(blackboard, ctx.dt_seconds),
            None => NodeStatus::Failure,
        };
        self.status = Some(status);
        status
    }

    fn reset(&mut self) {
        self.status = None;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }
}
