//! Navigation sessions for turnstep.
//!
//! Connects the progress tracker to its collaborators: a geofence monitor,
//! a speech provider and a routing provider.

#![warn(missing_docs)]

pub mod monitor;
pub mod provider;
pub mod replay;
pub mod session;
pub mod speaker;

pub use monitor::{CircularRegionMonitor, GeofenceMonitor};
pub use provider::{RoutingProvider, StoredRouteProvider};
pub use replay::{spawn_replay, trace_events};
pub use session::{LocationEvent, NavigationSession, SessionConfig, SessionSummary};
pub use speaker::{Speaker, TracingSpeaker, TranscriptSpeaker};

use turnstep_core::NavError;
use turnstep_storage::StorageError;

/// Errors raised while driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Tracker rejected the operation
    #[error(transparent)]
    Nav(#[from] NavError),

    /// Route store failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No route known for the destination
    #[error("no route to {0}")]
    RouteNotFound(String),
}
