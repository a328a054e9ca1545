//! Navigation configuration.

use crate::geofence::DEFAULT_GEOFENCE_RADIUS_METERS;
use crate::prompt::{DistanceUnit, Lookahead};
use serde::{Deserialize, Serialize};

/// Phrase spoken once the last step is passed.
pub const DEFAULT_ARRIVAL_MESSAGE: &str = "Arrived at destination.";

/// How routes are turned into geofences and prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Radius of each step geofence, in meters
    pub geofence_radius_meters: f64,

    /// Unit distances are announced in
    pub unit: DistanceUnit,

    /// Steps covered by the opening announcement
    pub lookahead: Lookahead,

    /// Phrase spoken on arrival
    pub arrival_message: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            geofence_radius_meters: DEFAULT_GEOFENCE_RADIUS_METERS,
            unit: DistanceUnit::default(),
            lookahead: Lookahead::default(),
            arrival_message: DEFAULT_ARRIVAL_MESSAGE.to_string(),
        }
    }
}

impl NavigationConfig {
    /// Set the display unit.
    pub fn with_unit(mut self, unit: DistanceUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the lookahead policy.
    pub fn with_lookahead(mut self, lookahead: Lookahead) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Set the geofence radius. Non-positive values fall back to the default.
    pub fn with_geofence_radius(mut self, meters: f64) -> Self {
        self.geofence_radius_meters = if meters > 0.0 {
            meters
        } else {
            DEFAULT_GEOFENCE_RADIUS_METERS
        };
        self
    }

    /// Set the arrival phrase.
    pub fn with_arrival_message(mut self, message: impl Into<String>) -> Self {
        self.arrival_message = message.into();
        self
    }
}
