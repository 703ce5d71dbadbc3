//! Serde model of a YAML tree document.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use arbor_bt::{BlackboardScope, ParallelPolicy, SubtreeReport};
use arbor_core::Blackboard;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// A set of named trees plus the name of the one to run.
///
/// ```yaml
/// root: guard
/// blackboard:
///   floats: { health: 100.0 }
/// trees:
///   guard:
///     selector:
///       children:
///         - condition: { binding: player_visible }
///         - action: { binding: patrol }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeDocument {
    /// Name of the tree the built [`BehaviorTree`](arbor_bt::BehaviorTree) runs.
    pub root: String,

    /// Initial blackboard values.
    #[serde(default)]
    pub blackboard: Blackboard,

    /// Tree definitions, referenced by name from `root` and `subtree` nodes.
    ///
    /// Node kinds are written as single-key maps (`condition: { ... }`) at
    /// every depth rather than as YAML tags.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub trees: BTreeMap<String, NodeSpec>,
}

/// One node of a tree definition, keyed by its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    Condition(LeafSpec),
    Action(LeafSpec),
    Inverter(DecoratorSpec),
    Succeeder(DecoratorSpec),
    Repeater(RepeaterSpec),
    Timer(TimerSpec),
    Sequence(CompositeSpec),
    Selector(CompositeSpec),
    Parallel(ParallelSpec),
    Subtree(SubtreeSpec),
}

/// Which kind of leaf a binding name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeafKind {
    Condition,
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafSpec {
    /// Registry key of the closure this leaf runs.
    pub binding: String,
    /// Display name; defaults to the binding.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoratorSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub child: Option<Box<NodeSpec>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepeaterSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// Required successes; negative means unbounded.
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub child: Option<Box<NodeSpec>>,
}

fn default_limit() -> i32 {
    -1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimerSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// Seconds of tick time before the timer succeeds.
    pub duration: f32,
    #[serde(default)]
    pub child: Option<Box<NodeSpec>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// Resume at the running child instead of re-walking from the first.
    #[serde(default)]
    pub memory: bool,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParallelSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_success_policy")]
    pub success: ParallelPolicy,
    #[serde(default = "default_failure_policy")]
    pub failure: ParallelPolicy,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_success_policy() -> ParallelPolicy {
    ParallelPolicy::RequireAll
}
fn default_failure_policy() -> ParallelPolicy {
    ParallelPolicy::RequireOne
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubtreeSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// Name of the embedded tree in the same document.
    pub tree: String,
    #[serde(default)]
    pub blackboard: BlackboardScope,
    #[serde(default)]
    pub report: SubtreeReport,
}

impl TreeDocument {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_yaml_str(&source)?;
        tracing::info!(
            path = %path.display(),
            root = %document.root,
            trees = document.trees.len(),
            "loaded tree document"
        );
        Ok(document)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Binding names used by leaves of `kind` anywhere in the document.
    pub fn bindings(&self, kind: LeafKind) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        for spec in self.trees.values() {
            spec.walk(&mut |node| match (kind, node) {
                (LeafKind::Condition, NodeSpec::Condition(leaf))
                | (LeafKind::Action, NodeSpec::Action(leaf)) => {
                    out.insert(leaf.binding.as_str());
                }
                _ => {}
            });
        }
        out
    }
}

impl NodeSpec {
    /// Short lowercase kind name as written in YAML.
    pub fn kind(&self) -> &'static str {
        match self {
            NodeSpec::Condition(_) => "condition",
            NodeSpec::Action(_) => "action",
            NodeSpec::Inverter(_) => "inverter",
            NodeSpec::Succeeder(_) => "succeeder",
            NodeSpec::Repeater(_) => "repeater",
            NodeSpec::Timer(_) => "timer",
            NodeSpec::Sequence(_) => "sequence",
            NodeSpec::Selector(_) => "selector",
            NodeSpec::Parallel(_) => "parallel",
            NodeSpec::Subtree(_) => "subtree",
        }
    }

    /// Direct children in evaluation order. Subtree references are not followed.
    pub fn children(&self) -> Vec<&NodeSpec> {
        match self {
            NodeSpec::Condition(_) | NodeSpec::Action(_) | NodeSpec::Subtree(_) => Vec::new(),
            NodeSpec::Inverter(d) | NodeSpec::Succeeder(d) => {
                d.child.as_deref().into_iter().collect()
            }
            NodeSpec::Repeater(r) => r.child.as_deref().into_iter().collect(),
            NodeSpec::Timer(t) => t.child.as_deref().into_iter().collect(),
            NodeSpec::Sequence(c) | NodeSpec::Selector(c) => c.children.iter().collect(),
            NodeSpec::Parallel(p) => p.children.iter().collect(),
        }
    }

    /// Pre-order walk over this node and its descendants.
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a NodeSpec)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}
