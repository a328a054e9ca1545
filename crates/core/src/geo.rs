//! Coordinates, great-circle distance and heading readings.

use crate::error::{NavError, Result};
use serde::{Deserialize, Serialize};

/// Mean earth radius used for haversine distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 position in degrees.
///
/// Deserialization goes through [`Coordinate::new`], so stored routes and
/// traces cannot carry out-of-range positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    /// Latitude in degrees, -90 to +90
    pub latitude: f64,

    /// Longitude in degrees, -180 to +180
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(NavError::InvalidCoordinate(format!(
                "latitude {} outside -90..=90",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(NavError::InvalidCoordinate(format!(
                "longitude {} outside -180..=180",
                longitude
            )));
        }
        Ok(Self { latitude, longitude })
    }

    /// Parse a coordinate from separate latitude/longitude text inputs.
    ///
    /// Both fields must be non-empty after trimming and parse as numbers.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self> {
        let latitude = latitude.trim();
        let longitude = longitude.trim();
        if latitude.is_empty() || longitude.is_empty() {
            return Err(NavError::InvalidCoordinate(
                "latitude and longitude are both required".to_string(),
            ));
        }

        let lat: f64 = latitude
            .parse()
            .map_err(|_| NavError::InvalidCoordinate(format!("not a number: {}", latitude)))?;
        let lon: f64 = longitude
            .parse()
            .map_err(|_| NavError::InvalidCoordinate(format!("not a number: {}", longitude)))?;

        Self::new(lat, lon)
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let sin_dlat = (delta_lat / 2.0).sin();
        let sin_dlon = (delta_lon / 2.0).sin();
        let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Initial bearing towards `other`, degrees clockwise from north (0..360).
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = NavError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A raw compass reading as delivered by the location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingReading {
    /// Heading relative to true north, degrees (0 when unavailable)
    pub true_heading: f64,

    /// Heading relative to magnetic north, degrees
    pub magnetic_heading: f64,

    /// Accuracy in degrees; negative means the reading is invalid
    pub accuracy: f64,
}

impl HeadingReading {
    /// Resolve the usable heading.
    ///
    /// Invalid readings yield `None`. True heading wins when it is positive,
    /// otherwise the magnetic heading is used.
    pub fn resolve(&self) -> Option<f64> {
        if self.accuracy < 0.0 {
            return None;
        }
        if self.true_heading > 0.0 {
            Some(self.true_heading)
        } else {
            Some(self.magnetic_heading)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // ~111km per degree of latitude
        let d = coord(35.0, 139.0).distance_to(&coord(36.0, 139.0));
        assert!((d - 111_195.0).abs() < 100.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let c = coord(37.3349, -122.009);
        assert!(c.distance_to(&c) < 1e-6);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = coord(35.0, 139.0);
        let north = origin.bearing_to(&coord(36.0, 139.0));
        assert!(north < 1.0 || (north - 360.0).abs() < 1.0);
        assert!((origin.bearing_to(&coord(35.0, 140.0)) - 90.0).abs() < 1.0);
        assert!((origin.bearing_to(&coord(34.0, 139.0)) - 180.0).abs() < 1.0);
        assert!((origin.bearing_to(&coord(35.0, 138.0)) - 270.0).abs() < 1.0);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_parse_text_fields() {
        let c = Coordinate::parse(" 37.7749 ", "-122.4194").unwrap();
        assert_eq!(c.latitude, 37.7749);
        assert_eq!(c.longitude, -122.4194);

        assert!(matches!(
            Coordinate::parse("", "-122.4"),
            Err(NavError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            Coordinate::parse("north", "-122.4"),
            Err(NavError::InvalidCoordinate(_))
        ));
        assert!(Coordinate::parse("120", "10").is_err());
    }

    #[test]
    fn test_deserialize_checks_range() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 37.77, "longitude": -122.41}"#).unwrap();
        assert_eq!(ok, coord(37.77, -122.41));

        let out_of_range = r#"{"latitude": 200.0, "longitude": -999.0}"#;
        let err = serde_json::from_str::<Coordinate>(out_of_range).unwrap_err();
        assert!(err.to_string().contains("invalid coordinate"));

        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude": 10.0}"#).is_err());
    }

    fn reading(true_heading: f64, magnetic_heading: f64, accuracy: f64) -> HeadingReading {
        HeadingReading {
            true_heading,
            magnetic_heading,
            accuracy,
        }
    }

    #[test]
    fn test_heading_resolution() {
        assert_eq!(reading(90.0, 80.0, -1.0).resolve(), None);
        assert_eq!(reading(90.0, 80.0, 5.0).resolve(), Some(90.0));
        assert_eq!(reading(0.0, 80.0, 5.0).resolve(), Some(80.0));
    }
}
