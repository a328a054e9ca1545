//! Navigation error taxonomy.

use crate::id::GeofenceId;

/// Result alias for navigation operations.
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors surfaced by the navigation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    /// Route had no steps
    #[error("invalid route: a route needs at least one step")]
    InvalidRoute,

    /// Operation requires an active navigation session
    #[error("not navigating")]
    NotNavigating,

    /// Region event for a geofence that is not part of the loaded route
    #[error("unknown geofence: {0}")]
    UnknownGeofence(GeofenceId),

    /// Region event for a geofence whose step was already passed
    #[error("geofence already passed: {0}")]
    PassedGeofence(GeofenceId),

    /// Latitude/longitude out of range or unparseable
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Step distance negative or not a number
    #[error("invalid step distance: {0}")]
    InvalidDistance(f64),
}
