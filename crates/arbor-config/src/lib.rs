//! Declarative behavior trees.
//!
//! A [`TreeDocument`] is a YAML file naming a set of trees, the one to run and
//! an optional initial blackboard. Leaves refer to closures by name; a
//! [`BindingRegistry`] supplies them and a [`TreeBuilder`] assembles the
//! runnable [`BehaviorTree`](arbor_bt::BehaviorTree).

#![forbid(unsafe_code)]

pub mod build;
pub mod document;
pub mod error;
pub mod registry;

use std::path::Path;

use arbor_bt::BehaviorTree;

pub use build::{BuildMode, TreeBuilder};
pub use document::{
    CompositeSpec, DecoratorSpec, LeafKind, LeafSpec, NodeSpec, ParallelSpec, RepeaterSpec,
    SubtreeSpec, TimerSpec, TreeDocument,
};
pub use error::{ConfigError, Result};
pub use registry::BindingRegistry;

/// Parses `source` and builds its root tree in strict mode.
pub fn tree_from_str(source: &str, registry: &BindingRegistry) -> Result<BehaviorTree> {
    let document = TreeDocument::from_yaml_str(source)?;
    TreeBuilder::new(registry).build(&document)
}

/// Loads the document at `path` and builds its root tree in strict mode.
pub fn load_tree(path: impl AsRef<Path>, registry: &BindingRegistry) -> Result<BehaviorTree> {
    let document = TreeDocument::from_path(path)?;
    TreeBuilder::new(registry).build(&document)
}
