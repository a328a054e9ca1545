//! Navigation progress tracking.
//!
//! Turns a route into geofences and a prompt queue, then steps through the
//! queue as region-entry notifications arrive.

#![warn(missing_docs)]

pub mod announcer;
pub mod tracker;

pub use announcer::PromptBuilder;
pub use tracker::{ProgressTracker, RouteLoad, StepTracker};
