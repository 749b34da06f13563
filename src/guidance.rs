//! Framing and focus guidance.
//!
//! Each tick turns one camera frame into coarse quality metrics and feeds a
//! small dwell-timed state machine that tells the user how to reposition the
//! camera until the shot is steady and sharp enough to capture.

pub mod engine;
pub mod metrics;
pub mod state;

#[cfg(test)]
mod tests;

pub use engine::{GuidanceEngine, GuidanceResult};
pub use state::GuidanceState;
