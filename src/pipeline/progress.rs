//! Progress reporting capability.
//!
//! The pipelines call a `ProgressSink` with a human-readable status line at
//! each stage boundary. Reporting is fire-and-forget: sinks must not block
//! and must not panic.

use std::sync::Mutex;

/// Pluggable progress handler for pipeline invocations.
pub trait ProgressSink: Send + Sync {
    /// Handle one status message. Called at each stage boundary.
    fn report(&self, message: &str);

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "progress"
    }
}

/// Discards all progress messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _message: &str) {}

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Collects progress messages for library and test use.
#[derive(Debug, Default)]
pub struct CollectorProgress {
    messages: Mutex<Vec<String>>,
}

impl CollectorProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages received so far, in order.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressSink for CollectorProgress {
    fn report(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}
