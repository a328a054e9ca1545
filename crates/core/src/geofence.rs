//! Circular geofences around route step anchors.

use crate::geo::Coordinate;
use crate::id::GeofenceId;
use crate::route::RouteStep;
use serde::{Deserialize, Serialize};

/// Radius of every step geofence unless configured otherwise.
pub const DEFAULT_GEOFENCE_RADIUS_METERS: f64 = 20.0;

/// A circular region that triggers when entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    /// Ordinal of the step this geofence guards
    pub id: GeofenceId,

    /// Region center
    pub center: Coordinate,

    /// Region radius in meters
    pub radius_meters: f64,
}

impl Geofence {
    /// Create a geofence.
    pub fn new(id: GeofenceId, center: Coordinate, radius_meters: f64) -> Self {
        Self { id, center, radius_meters }
    }

    /// Geofence for the step at `index`.
    pub fn for_step(index: usize, step: &RouteStep, radius_meters: f64) -> Self {
        Self::new(GeofenceId::new(index), step.anchor, radius_meters)
    }

    /// Whether `point` lies inside the region (boundary inclusive).
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.center.distance_to(point) <= self.radius_meters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_within_radius() {
        let center = Coordinate::new(37.0, -122.0).unwrap();
        let fence = Geofence::new(GeofenceId::new(0), center, DEFAULT_GEOFENCE_RADIUS_METERS);

        // 0.0001 deg latitude is ~11m
        let near = Coordinate::new(37.0001, -122.0).unwrap();
        // 0.0005 deg latitude is ~56m
        let far = Coordinate::new(37.0005, -122.0).unwrap();

        assert!(fence.contains(&center));
        assert!(fence.contains(&near));
        assert!(!fence.contains(&far));
    }

    #[test]
    fn test_for_step_uses_anchor_and_index() {
        let anchor = Coordinate::new(10.0, 20.0).unwrap();
        let step = RouteStep::new(100.0, "Turn left", anchor);
        let fence = Geofence::for_step(4, &step, 35.0);

        assert_eq!(fence.id, GeofenceId::new(4));
        assert_eq!(fence.center, anchor);
        assert_eq!(fence.radius_meters, 35.0);
    }
}
