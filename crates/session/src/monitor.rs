//! Geofence monitoring.

use std::collections::BTreeMap;
use tracing::debug;
use turnstep_core::{Coordinate, Geofence, GeofenceId};

/// Watches geofences and reports region entries.
pub trait GeofenceMonitor: Send {
    /// Begin watching `geofences` in addition to any already watched.
    fn start_monitoring(&mut self, geofences: &[Geofence]);

    /// Stop watching one geofence. Unknown ids are ignored.
    fn stop_monitoring(&mut self, id: GeofenceId);

    /// Stop watching everything.
    fn stop_all(&mut self);

    /// Ids currently watched, ascending.
    fn monitored(&self) -> Vec<GeofenceId>;

    /// Feed a location fix; returns the regions just entered, ascending.
    fn observe(&mut self, location: &Coordinate) -> Vec<GeofenceId>;
}

/// In-memory monitor for circular regions.
///
/// Entry is edge-triggered: a region reports once when a fix lands inside it
/// after a fix outside it (or before any fix was seen for that region).
#[derive(Debug, Default)]
pub struct CircularRegionMonitor {
    regions: BTreeMap<GeofenceId, WatchedRegion>,
}

#[derive(Debug)]
struct WatchedRegion {
    geofence: Geofence,
    inside: bool,
}

impl CircularRegionMonitor {
    /// Create an empty monitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of regions watched.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing is watched.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl GeofenceMonitor for CircularRegionMonitor {
    fn start_monitoring(&mut self, geofences: &[Geofence]) {
        for geofence in geofences {
            self.regions.insert(
                geofence.id,
                WatchedRegion {
                    geofence: *geofence,
                    inside: false,
                },
            );
        }
        debug!("Monitoring {} regions", self.regions.len());
    }

    fn stop_monitoring(&mut self, id: GeofenceId) {
        if self.regions.remove(&id).is_some() {
            debug!("Stopped monitoring region {}", id);
        }
    }

    fn stop_all(&mut self) {
        self.regions.clear();
    }

    fn monitored(&self) -> Vec<GeofenceId> {
        self.regions.keys().copied().collect()
    }

    fn observe(&mut self, location: &Coordinate) -> Vec<GeofenceId> {
        let mut entered = Vec::new();

        for (id, region) in self.regions.iter_mut() {
            let inside = region.geofence.contains(location);
            if inside && !region.inside {
                entered.push(*id);
            }
            region.inside = inside;
        }

        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64) -> Coordinate {
        Coordinate::new(lat, -122.0).unwrap()
    }

    fn fences() -> Vec<Geofence> {
        vec![
            Geofence::new(GeofenceId::new(0), coord(37.000), 20.0),
            Geofence::new(GeofenceId::new(1), coord(37.005), 20.0),
        ]
    }

    #[test]
    fn test_entry_is_edge_triggered() {
        let mut monitor = CircularRegionMonitor::new();
        monitor.start_monitoring(&fences());

        assert!(monitor.observe(&coord(36.999)).is_empty());
        assert_eq!(monitor.observe(&coord(37.000)), vec![GeofenceId::new(0)]);
        // Still inside: no second report
        assert!(monitor.observe(&coord(37.00005)).is_empty());
        // Leave and come back
        assert!(monitor.observe(&coord(37.002)).is_empty());
        assert_eq!(monitor.observe(&coord(37.000)), vec![GeofenceId::new(0)]);
    }

    #[test]
    fn test_first_fix_inside_counts_as_entry() {
        let mut monitor = CircularRegionMonitor::new();
        monitor.start_monitoring(&fences());
        assert_eq!(monitor.observe(&coord(37.005)), vec![GeofenceId::new(1)]);
    }

    #[test]
    fn test_stop_monitoring() {
        let mut monitor = CircularRegionMonitor::new();
        monitor.start_monitoring(&fences());
        assert_eq!(monitor.monitored(), vec![GeofenceId::new(0), GeofenceId::new(1)]);

        monitor.stop_monitoring(GeofenceId::new(0));
        monitor.stop_monitoring(GeofenceId::new(7));
        assert_eq!(monitor.monitored(), vec![GeofenceId::new(1)]);
        assert!(monitor.observe(&coord(37.000)).is_empty());

        monitor.stop_all();
        assert!(monitor.is_empty());
        assert!(monitor.observe(&coord(37.005)).is_empty());
    }
}
