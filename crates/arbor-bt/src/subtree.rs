use std::borrow::Cow;

use arbor_core::{BehaviorNode, Blackboard, NodeStatus, TickContext};

use crate::BehaviorTree;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which blackboard a nested tree reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlackboardScope {
    /// The parent tree's blackboard, lent for the duration of the tick.
    #[default]
    Shared,
    /// The nested tree's own blackboard.
    Isolated,
}

/// What a [`SubtreeNode`] reports to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubtreeReport {
    /// The nested root's actual status.
    #[default]
    Forward,
    /// `Success` on every tick, whatever the nested tree did (fire and forget).
    AlwaysSucceed,
}

/// Embeds an independent [`BehaviorTree`] as a single node.
///
/// Each tick performs the nested tree's own driver step: the nested root is
/// ticked and, if it reports a terminal status, reset in the same tick. A
/// nested tree without a root counts as `Failure`. Resetting the subtree node
/// abandons the nested pass but keeps the nested tree's own blackboard.
///
/// Every parent tick advances the nested tree's
/// [`tick_count`](BehaviorTree::tick_count). Nested nodes and the nested trace
/// sink see the parent's tick index.
pub struct SubtreeNode {
    name: Cow<'static, str>,
    tree: BehaviorTree,
    scope: BlackboardScope,
    report: SubtreeReport,
    status: Option<NodeStatus>,
}

impl SubtreeNode {
    pub fn new(tree: BehaviorTree) -> Self {
        Self {
            name: Cow::Borrowed("Subtree"),
            tree,
            scope: BlackboardScope::default(),
            report: SubtreeReport::default(),
            status: None,
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_scope(mut self, scope: BlackboardScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_report(mut self, report: SubtreeReport) -> Self {
        self.report = report;
        self
    }

    pub fn scope(&self) -> BlackboardScope {
        self.scope
    }

    pub fn report(&self) -> SubtreeReport {
        self.report
    }

    pub fn tree(&self) -> &BehaviorTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut BehaviorTree {
        &mut self.tree
    }
}

impl BehaviorNode for SubtreeNode {
    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let nested = match self.scope {
            BlackboardScope::Shared => self.tree.tick_with_blackboard(ctx, blackboard),
            BlackboardScope::Isolated => self.tree.tick_in_context(ctx),
        };

        let status = match self.report {
            SubtreeReport::Forward => nested.unwrap_or(NodeStatus::Failure),
            SubtreeReport::AlwaysSucceed => NodeStatus::Success,
        };
        self.status = Some(status);
        status
    }

    fn reset(&mut self) {
        self.status = None;
        self.tree.reset_root();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<NodeStatus> {
        self.status
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn BehaviorNode)) {
        if let Some(root) = self.tree.root() {
            f(root);
        }
    }
}
