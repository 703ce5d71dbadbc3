#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of ticking a behavior node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeStatus {
    Success,
    Failure,
    /// Still in progress. The caller must tick the *same* node instance again on
    /// a later tick; it is not a restart.
    Running,
}

impl NodeStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, NodeStatus::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, NodeStatus::Failure)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, NodeStatus::Running)
    }

    /// `Success` or `Failure`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_running()
    }

    /// Swaps `Success` and `Failure`; `Running` passes through.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            NodeStatus::Success => NodeStatus::Failure,
            NodeStatus::Failure => NodeStatus::Success,
            NodeStatus::Running => NodeStatus::Running,
        }
    }

    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            NodeStatus::Success
        } else {
            NodeStatus::Failure
        }
    }

    /// Stable numeric code used in trace events.
    pub fn code(self) -> u64 {
        match self {
            NodeStatus::Success => 0,
            NodeStatus::Failure => 1,
            NodeStatus::Running => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Success => "success",
            NodeStatus::Failure => "failure",
            NodeStatus::Running => "running",
        }
    }
}

impl core::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
