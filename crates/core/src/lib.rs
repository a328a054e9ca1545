//! turnstep core data models.
//!
//! Routes, geofences, prompts and the progress types shared by the
//! tracker, the route store and navigation sessions.

#![warn(missing_docs)]

// Identities and errors
mod error;
mod id;

// Geometry and route input
mod geo;
mod geofence;
mod route;
mod trace;

// Progress and announcements
mod config;
mod progress;
mod prompt;

// Re-exports
pub use error::{NavError, Result};
pub use id::*;

pub use geo::{Coordinate, HeadingReading, EARTH_RADIUS_M};
pub use geofence::{Geofence, DEFAULT_GEOFENCE_RADIUS_METERS};
pub use route::{Route, RouteStep};
pub use trace::{LocationFix, LocationTrace};

pub use config::{NavigationConfig, DEFAULT_ARRIVAL_MESSAGE};
pub use progress::{NavState, ProgressEvent, ProgressState};
pub use prompt::{DistanceUnit, Lookahead, Prompt, METERS_PER_MILE};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
