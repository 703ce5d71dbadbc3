//! Decorator nodes.
//!
//! Every decorator owns at most one child, optional until assigned, and forwards
//! the tick context to it. Ticking a decorator that has no child yields
//! `Failure`.

use std::borrow::Cow;

use arbor_core::{BehaviorNode, Blackboard, NodeStatus, TickContext};

macro_rules! decorator_common {
    ($ty:ident) => {
        impl $ty {
            pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
                self.name = name.into();
                self
            }

            /// Attaches `child`, returning the previously attached one.
            pub fn set_child(
                &mut self,
                child: Box<dyn BehaviorNode>,
            ) -> Option<Box<dyn BehaviorNode>> {
                self.child.replace(child)
            }

            pub fn child(&self) -> Option<&dyn BehaviorNode> {
                self.child.as_deref()
            }

            fn missing_child(&self) -> NodeStatus {
                tracing::debug!(node = %self.name, "decorator ticked without a child");
                NodeStatus::Failure
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::empty()
            }
        }
    };
}

/// Swaps the child's `Success` and `Failure`; `Running` passes through.
pub struct Inverter {
    name: Cow<'static, str>,
    child: Option<Box<dyn BehaviorNode>>,
    status: Option<NodeStatus>,
}

impl Inverter {
    pub fn new(child: Box<dyn BehaviorNode>) -> Self {
        Self {
            child: Some(child),
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        Self {
            name: Cow::Borrowed("Inverter"),
            child: None,
            status: None,
        }
    }
}

decorator_common!(Inverter);

impl BehaviorNode for Inverter {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let status = match self.child.as_mut() {
            Some(child) => child.tick(ctx, blackboard).invert(),
            None => self.missing_child(),
        };
        self.status = Some(status);
        status
    }

    fn reset(&mut self) {
        self.status = None;
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        if let Some(child) = self.child.as_deref() {
            f(child);
        }
    }
}

/// Reports any terminal child status as `Success`; `Running` passes through.
pub struct Succeeder {
    name: Cow<'static, str>,
    child: Option<Box<dyn BehaviorNode>>,
    status: Option<NodeStatus>,
}

impl Succeeder {
    pub fn new(child: Box<dyn BehaviorNode>) -> Self {
        Self {
            child: Some(child),
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        Self {
            name: Cow::Borrowed("Succeeder"),
            child: None,
            status: None,
        }
    }
}

decorator_common!(Succeeder);

impl BehaviorNode for Succeeder {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let status = match self.child.as_mut() {
            Some(child) => match child.tick(ctx, blackboard) {
                NodeStatus::Running => NodeStatus::Running,
                NodeStatus::Success | NodeStatus::Failure => NodeStatus::Success,
            },
            None => self.missing_child(),
        };
        self.status = Some(status);
        status
    }

    fn reset(&mut self) {
        self.status = None;
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        if let Some(child) = self.child.as_deref() {
            f(child);
        }
    }
}

/// Re-runs its child until it has succeeded `limit` times.
///
/// Each child success bumps a private counter and, unless the limit is reached,
/// resets the child so the next tick starts a fresh iteration; the repeater
/// reports `Running` meanwhile. Reaching the limit reports `Success` and zeroes
/// the counter. A child failure zeroes the counter and reports `Failure`. An
/// unbounded repeater never succeeds on its own.
pub struct Repeater {
    name: Cow<'static, str>,
    child: Option<Box<dyn BehaviorNode>>,
    limit: Option<u32>,
    completed: u32,
    status: Option<NodeStatus>,
}

impl Repeater {
    pub fn new(child: Box<dyn BehaviorNode>, limit: u32) -> Self {
        Self {
            child: Some(child),
            limit: Some(limit),
            ..Self::empty()
        }
    }

    pub fn forever(child: Box<dyn BehaviorNode>) -> Self {
        Self {
            child: Some(child),
            ..Self::empty()
        }
    }

    /// An unbounded repeater with no child attached.
    pub fn empty() -> Self {
        Self {
            name: Cow::Borrowed("Repeater"),
            child: None,
            limit: None,
            completed: 0,
            status: None,
        }
    }

    /// `-1` (or any negative limit) means unbounded.
    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = u32::try_from(limit).ok();
        self
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.completed >= limit)
    }

    fn complete(&mut self, status: NodeStatus) -> NodeStatus {
        self.completed = 0;
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
        status
    }

    fn step(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        if self.child.is_none() {
            return self.missing_child();
        }

        if self.limit_reached() {
            return self.complete(NodeStatus::Success);
        }

        let status = match self.child.as_mut() {
            Some(child) => child.tick(ctx, blackboard),
            None => NodeStatus::Failure,
        };
        match status {
            NodeStatus::Running => NodeStatus::Running,
            NodeStatus::Failure => self.complete(NodeStatus::Failure),
            NodeStatus::Success => {
                self.completed = self.completed.saturating_add(1);
                if self.limit_reached() {
                    return self.complete(NodeStatus::Success);
                }
                if let Some(child) = self.child.as_mut() {
                    child.reset();
                }
                NodeStatus::Running
            }
        }
    }
}

decorator_common!(Repeater);

impl BehaviorNode for Repeater {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let status = self.step(ctx, blackboard);
        self.status = Some(status);
        status
    }

    fn reset(&mut self) {
        self.status = None;
        self.completed = 0;
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        if let Some(child) = self.child.as_deref() {
            f(child);
        }
    }
}

/// Keeps ticking its child until `duration` seconds of tick time have elapsed.
///
/// The child is ticked on every call inside the window and its result is
/// ignored. A child that finishes early keeps its settled state until the window
/// closes. Once the accumulated `dt_seconds` reach `duration` the timer resets
/// the child, reports `Success` and zeroes its clock; until then it reports
/// `Running`.
pub struct Timer {
    name: Cow<'static, str>,
    child: Option<Box<dyn BehaviorNode>>,
    duration: f32,
    elapsed: f32,
    status: Option<NodeStatus>,
}

impl Timer {
    pub fn new(child: Box<dyn BehaviorNode>, duration: f32) -> Self {
        Self {
            child: Some(child),
            duration,
            ..Self::empty()
        }
    }

    /// A zero-length timer with no child attached.
    pub fn empty() -> Self {
        Self {
            name: Cow::Borrowed("Timer"),
            child: None,
            duration: 0.0,
            elapsed: 0.0,
            status: None,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn complete(&mut self) -> NodeStatus {
        self.elapsed = 0.0;
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
        NodeStatus::Success
    }

    fn step(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        if self.child.is_none() {
            return self.missing_child();
        }

        if self.elapsed >= self.duration {
            return self.complete();
        }

        if let Some(child) = self.child.as_mut() {
            child.tick(ctx, blackboard);
        }

        self.elapsed += ctx.dt_seconds;
        if self.elapsed >= self.duration {
            return self.complete();
        }
        NodeStatus::Running
    }
}

decorator_common!(Timer);

impl BehaviorNode for Timer {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let status = self.step(ctx, blackboard);
        self.status = Some(status);
        status
    }

    fn reset(&mut self) {
        self.status = None;
        self.elapsed = 0.0;
        if let Some(child) = self.child.as_mut() {
            child.reset();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        if let Some(child) = self.child.as_deref() {
            f(child);
        }
    }
}
