/// Per-tick inputs handed to every node.
///
/// `dt_seconds` is the real time elapsed since the previous tick of the owning
/// tree. `tick` is a monotonically increasing pass counter, useful for traces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// A context for driving a node by hand (tests, tools).
    pub fn with_dt(dt_seconds: f32) -> Self {
        Self::new(0, dt_seconds)
    }
}
