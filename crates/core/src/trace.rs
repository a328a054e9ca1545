//! Recorded location fixes, replayed to drive a session.

use crate::Time;
use crate::geo::{Coordinate, HeadingReading};
use serde::{Deserialize, Serialize};

/// A single location update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Reported position
    pub coordinate: Coordinate,

    /// Compass reading taken with the fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<HeadingReading>,

    /// When the fix was taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<Time>,
}

impl LocationFix {
    /// A fix with only a position.
    pub fn at(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            heading: None,
            recorded_at: None,
        }
    }
}

/// An ordered series of fixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationTrace {
    /// Fixes in the order they were reported
    pub fixes: Vec<LocationFix>,
}

impl LocationTrace {
    /// Build a trace from bare coordinates.
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            fixes: coordinates.into_iter().map(LocationFix::at).collect(),
        }
    }

    /// Number of fixes.
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// Whether the trace has no fixes.
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}
