//! scrollmark core.
//!
//! Turns a noisy stream of scroll samples into a monotonic, deduplicated,
//! debounced sequence of milestone events. All I/O goes through the traits
//! in [`backend`]; this crate has no platform dependencies.

// Re-exports from scrollmark-types (foundation types and traits).
pub use scrollmark_types::backend;
pub use scrollmark_types::config;
pub use scrollmark_types::error;
pub use scrollmark_types::event;
pub use scrollmark_types::signal;

pub mod debounce;
pub mod depth;
pub mod session;
pub mod sink;
pub mod tracker;

#[cfg(test)]
pub(crate) mod test_utils;

pub use session::{ScrollSession, SessionSummary};
pub use tracker::MilestoneTracker;
