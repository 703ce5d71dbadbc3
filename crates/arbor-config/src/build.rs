use arbor_bt::builder::Node;
use arbor_bt::{
    ActionNode, BehaviorTree, ConditionNode, Inverter, MemSelector, MemSequence, Parallel,
    Repeater, Selector, Sequence, SubtreeNode, Succeeder, Timer,
};

use crate::document::{
    CompositeSpec, DecoratorSpec, LeafSpec, NodeSpec, RepeaterSpec, SubtreeSpec, TimerSpec,
    TreeDocument,
};
use crate::error::{ConfigError, Result};
use crate::registry::BindingRegistry;

/// How the builder treats a leaf whose binding is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Unknown bindings are an error.
    #[default]
    Strict,
    /// Unknown bindings become unbound leaves that fail every tick.
    Lenient,
}

/// Turns a [`TreeDocument`] into a runnable [`BehaviorTree`].
///
/// Every `subtree` reference is instantiated separately, so two references to
/// the same definition never share node state. References are followed
/// eagerly and a reference cycle is reported as
/// [`ConfigError::SubtreeCycle`].
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'r> {
    registry: &'r BindingRegistry,
    mode: BuildMode,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(registry: &'r BindingRegistry) -> Self {
        Self {
            registry,
            mode: BuildMode::Strict,
        }
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn lenient(self) -> Self {
        self.with_mode(BuildMode::Lenient)
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Builds the document's root tree and seeds its blackboard.
    pub fn build(&self, document: &TreeDocument) -> Result<BehaviorTree> {
        if !document.trees.contains_key(&document.root) {
            return Err(ConfigError::UnknownRoot(document.root.clone()));
        }
        let root = self.build_named(document, &document.root, &mut Vec::new())?;
        Ok(BehaviorTree::new(root).with_blackboard(document.blackboard.clone()))
    }

    /// Builds the tree called `name` as a standalone node.
    pub fn build_tree(&self, document: &TreeDocument, name: &str) -> Result<Node> {
        self.build_named(document, name, &mut Vec::new())
    }

    fn build_named(
        &self,
        document: &TreeDocument,
        name: &str,
        stack: &mut Vec<String>,
    ) -> Result<Node> {
        if let Some(start) = stack.iter().position(|entry| entry == name) {
            let mut cycle = stack[start..].to_vec();
            cycle.push(name.to_owned());
            return Err(ConfigError::SubtreeCycle(cycle));
        }
        let spec = document
            .trees
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTree(name.to_owned()))?;

        stack.push(name.to_owned());
        let node = self.build_node(document, spec, stack);
        stack.pop();
        node
    }

    fn build_node(
        &self,
        document: &TreeDocument,
        spec: &NodeSpec,
        stack: &mut Vec<String>,
    ) -> Result<Node> {
        let node: Node = match spec {
            NodeSpec::Condition(leaf) => Box::new(self.condition(leaf)?),
            NodeSpec::Action(leaf) => Box::new(self.action(leaf)?),
            NodeSpec::Inverter(DecoratorSpec { name, child }) => {
                let mut node = Inverter::empty();
                if let Some(child) = self.child(document, child.as_deref(), stack)? {
                    node.set_child(child);
                }
                Box::new(rename(node, name, Inverter::named))
            }
            NodeSpec::Succeeder(DecoratorSpec { name, child }) => {
                let mut node = Succeeder::empty();
                if let Some(child) = self.child(document, child.as_deref(), stack)? {
                    node.set_child(child);
                }
                Box::new(rename(node, name, Succeeder::named))
            }
            NodeSpec::Repeater(RepeaterSpec { name, limit, child }) => {
                let mut node = Repeater::empty().with_limit(*limit);
                if let Some(child) = self.child(document, child.as_deref(), stack)? {
                    node.set_child(child);
                }
                Box::new(rename(node, name, Repeater::named))
            }
            NodeSpec::Timer(TimerSpec {
                name,
                duration,
                child,
            }) => {
                if !duration.is_finite() || *duration < 0.0 {
                    return Err(ConfigError::InvalidDuration {
                        name: name.clone().unwrap_or_else(|| "Timer".to_owned()),
                        duration: *duration,
                    });
                }
                let mut node = Timer::empty().with_duration(*duration);
                if let Some(child) = self.child(document, child.as_deref(), stack)? {
                    node.set_child(child);
                }
                Box::new(rename(node, name, Timer::named))
            }
            NodeSpec::Sequence(CompositeSpec {
                name,
                memory,
                children,
            }) => {
                let children = self.children(document, children, stack)?;
                if *memory {
                    Box::new(rename(MemSequence::new(children), name, MemSequence::named))
                } else {
                    Box::new(rename(Sequence::new(children), name, Sequence::named))
                }
            }
            NodeSpec::Selector(CompositeSpec {
                name,
                memory,
                children,
            }) => {
                let children = self.children(document, children, stack)?;
                if *memory {
                    Box::new(rename(MemSelector::new(children), name, MemSelector::named))
                } else {
                    Box::new(rename(Selector::new(children), name, Selector::named))
                }
            }
            NodeSpec::Parallel(parallel) => {
                let children = self.children(document, &parallel.children, stack)?;
                let node = Parallel::new(parallel.success, parallel.failure, children);
                Box::new(rename(node, &parallel.name, Parallel::named))
            }
            NodeSpec::Subtree(subtree) => Box::new(self.subtree(document, subtree, stack)?),
        };
        Ok(node)
    }

    fn child(
        &self,
        document: &TreeDocument,
        child: Option<&NodeSpec>,
        stack: &mut Vec<String>,
    ) -> Result<Option<Node>> {
        child
            .map(|spec| self.build_node(document, spec, stack))
            .transpose()
    }

    fn children(
        &self,
        document: &TreeDocument,
        specs: &[NodeSpec],
        stack: &mut Vec<String>,
    ) -> Result<Vec<Node>> {
        specs
            .iter()
            .map(|child| self.build_node(document, child, stack))
            .collect()
    }

    fn condition(&self, leaf: &LeafSpec) -> Result<ConditionNode> {
        let name = leaf_name(leaf);
        match self.registry.make_condition(&leaf.binding) {
            Some(predicate) => Ok(ConditionNode::new(name, predicate)),
            None if self.mode == BuildMode::Lenient => {
                tracing::warn!(
                    binding = %leaf.binding,
                    "no condition registered; leaf will fail"
                );
                Ok(ConditionNode::unbound(name))
            }
            None => Err(ConfigError::UnknownCondition(leaf.binding.clone())),
        }
    }

    fn action(&self, leaf: &LeafSpec) -> Result<ActionNode> {
        let name = leaf_name(leaf);
        match self.registry.make_action(&leaf.binding) {
            Some(action) => Ok(ActionNode::new(name, action)),
            None if self.mode == BuildMode::Lenient => {
                tracing::warn!(
                    binding = %leaf.binding,
                    "no action registered; leaf will fail"
                );
                Ok(ActionNode::unbound(name))
            }
            None => Err(ConfigError::UnknownAction(leaf.binding.clone())),
        }
    }

    fn subtree(
        &self,
        document: &TreeDocument,
        spec: &SubtreeSpec,
        stack: &mut Vec<String>,
    ) -> Result<SubtreeNode> {
        let root = self.build_named(document, &spec.tree, stack)?;
        tracing::debug!(
            tree = %spec.tree,
            scope = ?spec.blackboard,
            report = ?spec.report,
            "built subtree"
        );
        let name = spec.name.clone().unwrap_or_else(|| spec.tree.clone());
        Ok(SubtreeNode::new(BehaviorTree::new(root))
            .named(name)
            .with_scope(spec.blackboard)
            .with_report(spec.report))
    }
}

fn leaf_name(leaf: &LeafSpec) -> String {
    leaf.name.clone().unwrap_or_else(|| leaf.binding.clone())
}

fn rename<T>(node: T, name: &Option<String>, named: impl FnOnce(T, String) -> T) -> T {
    match name {
        Some(name) => named(node, name.clone()),
        None => node,
    }
}
