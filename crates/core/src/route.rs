//! Route model - what the routing provider hands over.

use crate::error::{NavError, Result};
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// One maneuver segment of a computed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRouteStep")]
pub struct RouteStep {
    /// Distance to the next maneuver, in meters
    pub distance_meters: f64,

    /// Human-readable maneuver instruction
    pub instruction: String,

    /// Where the step begins; its geofence is centered here
    pub anchor: Coordinate,
}

impl RouteStep {
    /// Create a new route step.
    pub fn new(distance_meters: f64, instruction: impl Into<String>, anchor: Coordinate) -> Self {
        Self {
            distance_meters: distance_meters.max(0.0),
            instruction: instruction.into(),
            anchor,
        }
    }
}

#[derive(Deserialize)]
struct RawRouteStep {
    distance_meters: f64,
    #[serde(default)]
    instruction: String,
    anchor: Coordinate,
}

impl TryFrom<RawRouteStep> for RouteStep {
    type Error = NavError;

    fn try_from(raw: RawRouteStep) -> Result<Self> {
        if !raw.distance_meters.is_finite() || raw.distance_meters < 0.0 {
            return Err(NavError::InvalidDistance(raw.distance_meters));
        }
        Ok(Self {
            distance_meters: raw.distance_meters,
            instruction: raw.instruction,
            anchor: raw.anchor,
        })
    }
}

/// An ordered, traversal-order list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Optional display name (usually the destination)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Steps in traversal order
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Create a route from its steps.
    pub fn new(steps: Vec<RouteStep>) -> Self {
        Self { name: None, steps }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sum of all step distances, in meters.
    pub fn total_distance_meters(&self) -> f64 {
        self.steps.iter().map(|s| s.distance_meters).sum()
    }

    /// Final step anchor, if any.
    pub fn destination(&self) -> Option<Coordinate> {
        self.steps.last().map(|s| s.anchor)
    }

    /// Whether the route has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
