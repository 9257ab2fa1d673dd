//! Pipeline orchestration: the Pace and Merge flows, progress reporting,
//! and the caller-driven lifecycle state.

pub mod merge;
pub mod pace;
pub mod progress;
pub mod state;
