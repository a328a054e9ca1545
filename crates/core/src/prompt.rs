//! Spoken prompts and how distances are announced.

use serde::{Deserialize, Serialize};

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// A human-readable instruction for one route step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    /// Index of the step this prompt announces
    pub step_index: usize,

    /// Text handed to the speech provider
    pub text: String,
}

impl Prompt {
    /// Create a prompt.
    pub fn new(step_index: usize, text: impl Into<String>) -> Self {
        Self {
            step_index,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Unit distances are announced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    /// Whole meters
    #[default]
    Meters,
    /// Miles with two decimals
    Miles,
}

impl DistanceUnit {
    /// Convert a distance in meters into this unit.
    pub fn convert(&self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Miles => meters / METERS_PER_MILE,
        }
    }

    /// Render a distance in meters the way it is spoken, e.g. `500 meters`.
    pub fn format(&self, meters: f64) -> String {
        match self {
            DistanceUnit::Meters => format!("{:.0} meters", self.convert(meters)),
            DistanceUnit::Miles => format!("{:.2} miles", self.convert(meters)),
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "meters",
            DistanceUnit::Miles => "miles",
        }
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metres" => Ok(DistanceUnit::Meters),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            other => Err(format!("unknown distance unit: {}", other)),
        }
    }
}

/// How many steps the opening announcement covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookahead {
    /// Announce only the first step
    Single,
    /// Announce the first step and the one after it
    #[default]
    Double,
}

impl Lookahead {
    /// Number of steps covered by the opening announcement.
    pub fn steps(&self) -> usize {
        match self {
            Lookahead::Single => 1,
            Lookahead::Double => 2,
        }
    }
}

impl std::str::FromStr for Lookahead {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" => Ok(Lookahead::Single),
            "double" | "2" => Ok(Lookahead::Double),
            other => Err(format!("unknown lookahead: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distances() {
        assert_eq!(DistanceUnit::Meters.format(500.0), "500 meters");
        assert_eq!(DistanceUnit::Meters.format(12.6), "13 meters");
        assert_eq!(DistanceUnit::Miles.format(1609.34), "1.00 miles");
        assert_eq!(DistanceUnit::Miles.format(500.0), "0.31 miles");
    }

    #[test]
    fn test_parse_unit_and_lookahead() {
        assert_eq!("Miles".parse::<DistanceUnit>().unwrap(), DistanceUnit::Miles);
        assert_eq!("m".parse::<DistanceUnit>().unwrap(), DistanceUnit::Meters);
        assert!("furlongs".parse::<DistanceUnit>().is_err());

        assert_eq!("single".parse::<Lookahead>().unwrap(), Lookahead::Single);
        assert_eq!("2".parse::<Lookahead>().unwrap().steps(), 2);
    }

    #[test]
    fn test_config_values_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&DistanceUnit::Miles).unwrap(), "\"miles\"");
        assert_eq!(serde_json::to_string(&Lookahead::Double).unwrap(), "\"double\"");
    }
}
