//! Caller-driven pipeline lifecycle state.
//!
//! The pipeline functions themselves are stateless and re-entrant; this
//! enum is the state machine the surrounding application drives, with the
//! transition table in one place so callers do not re-derive it.

/// Lifecycle of one pipeline invocation as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// No inputs selected.
    #[default]
    Idle,
    /// Inputs selected, not yet running.
    Ready,
    /// An invocation is in flight. No second invocation may start.
    Processing,
    /// The last invocation produced output.
    Done,
    /// The last invocation failed; all pipeline state should be reset
    /// before retrying from the beginning.
    Error,
}

impl PipelineState {
    /// Whether the caller may move from this state to `to`.
    pub fn can_transition(self, to: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, to),
            (Idle, Ready)
                | (Ready, Processing)
                | (Ready, Idle)
                | (Processing, Done)
                | (Processing, Error)
                | (Done, Ready)
                | (Done, Idle)
                | (Error, Ready)
                | (Error, Idle)
        )
    }

    /// Apply a transition if the table allows it. Returns whether the
    /// state changed.
    pub fn transition(&mut self, to: PipelineState) -> bool {
        if self.can_transition(to) {
            *self = to;
            true
        } else {
            false
        }
    }

    /// True while an invocation is in flight.
    pub fn is_processing(self) -> bool {
        self == PipelineState::Processing
    }
}
