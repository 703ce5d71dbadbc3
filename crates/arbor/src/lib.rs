//! Umbrella crate that re-exports the `arbor-*` building blocks.
//!
//! Enable only the layers you need: `core` for the node contract and the
//! blackboard, `bt` for the node library and the tree driver, `tools` for
//! trace sinks and `config` for YAML tree documents. `full` (the default)
//! enables all of them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use arbor_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use arbor_tools as tools;

#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub use arbor_bt as bt;

#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub use arbor_config as config;

/// The types most trees are built from.
#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub mod prelude {
    pub use arbor_bt::builder::*;
    pub use arbor_bt::{
        BehaviorNode, BehaviorTree, Blackboard, BlackboardScope, NodeStatus, ParallelPolicy,
        SubtreeReport, TickContext,
    };
    pub use arbor_core::Vec3;
}
