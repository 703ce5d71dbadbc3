//! Trace recording for arbor behavior trees.
//!
//! An `arbor_bt::BehaviorTree` streams one [`TraceEvent`] per tick
//! into an optional [`TraceSink`]. [`SharedTraceSink`] keeps the recorded
//! [`TraceLog`] readable by the caller after the sink is handed to the tree.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, SharedTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
