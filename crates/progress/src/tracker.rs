//! Step progression tracking.

use tracing::{debug, info, warn};
use turnstep_core::{
    Coordinate, Geofence, GeofenceId, HeadingReading, NavError, NavState, NavigationConfig,
    ProgressEvent, ProgressState, Prompt, Result, RouteStep,
};

use crate::announcer::PromptBuilder;

/// Step-progression state machine.
///
/// ```text
/// Idle ──load_route──▶ Navigating ──advance (last step)──▶ Arrived
///   ▲                       │                                 │
///   └────────clear──────────┴─────────────clear───────────────┘
/// ```
pub trait ProgressTracker {
    /// Load a route, replacing any previous one.
    ///
    /// Returns the geofences to monitor and the opening announcement.
    fn load_route(&mut self, steps: &[RouteStep]) -> Result<RouteLoad>;

    /// Move to the next step. Called once per region-entry notification.
    fn advance(&mut self) -> ProgressEvent;

    /// Region-entry notification identified by geofence id.
    ///
    /// Ids below the current step belong to steps already passed; they are
    /// rejected with [`NavError::PassedGeofence`] and do not advance.
    fn region_entered(&mut self, id: GeofenceId) -> Result<ProgressEvent>;

    /// Drop the route and return to `Idle`.
    fn clear(&mut self);

    /// Current lifecycle state.
    fn state(&self) -> NavState;

    /// Current step counter.
    fn progress(&self) -> ProgressState;
}

/// What a caller needs after a route loads.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLoad {
    /// Geofences the monitor must start watching, one per step
    pub geofences: Vec<Geofence>,

    /// Opening announcement to speak immediately
    pub announcement: Prompt,
}

/// In-memory progress tracker.
#[derive(Debug, Clone)]
pub struct StepTracker {
    builder: PromptBuilder,
    radius_meters: f64,
    state: NavState,
    progress: ProgressState,
    geofences: Vec<Geofence>,
    prompts: Vec<Prompt>,
    last_location: Option<Coordinate>,
    heading: Option<f64>,
}

impl StepTracker {
    /// Create a tracker with default configuration.
    pub fn new() -> Self {
        Self::with_config(&NavigationConfig::default())
    }

    /// Create a tracker from configuration.
    pub fn with_config(config: &NavigationConfig) -> Self {
        Self {
            builder: PromptBuilder::from_config(config),
            radius_meters: config.geofence_radius_meters,
            state: NavState::Idle,
            progress: ProgressState::default(),
            geofences: Vec::new(),
            prompts: Vec::new(),
            last_location: None,
            heading: None,
        }
    }

    /// Geofences of the active route; empty when idle or arrived.
    pub fn geofences(&self) -> &[Geofence] {
        &self.geofences
    }

    /// Prompt queue of the loaded route.
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Prompt for the step currently being driven.
    pub fn current_prompt(&self) -> Option<&Prompt> {
        if self.state != NavState::Navigating {
            return None;
        }
        self.prompts.get(self.progress.current_step_index)
    }

    /// Prompt builder in use.
    pub fn announcer(&self) -> &PromptBuilder {
        &self.builder
    }

    /// Cache the latest reported position.
    pub fn record_location(&mut self, location: Coordinate) {
        self.last_location = Some(location);
    }

    /// Cache the latest usable heading. Invalid readings are ignored.
    pub fn record_heading(&mut self, reading: HeadingReading) {
        match reading.resolve() {
            Some(heading) => self.heading = Some(heading),
            None => debug!("Ignoring heading reading with accuracy {}", reading.accuracy),
        }
    }

    /// Last reported position.
    pub fn last_location(&self) -> Option<Coordinate> {
        self.last_location
    }

    /// Last usable heading in degrees.
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    fn arrive(&mut self) {
        self.state = NavState::Arrived;
        self.geofences.clear();
        self.progress.current_step_index = 0;
        self.progress.active = false;
    }
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker for StepTracker {
    fn load_route(&mut self, steps: &[RouteStep]) -> Result<RouteLoad> {
        let Some(announcement) = self.builder.initial_announcement(steps) else {
            warn!("Rejected empty route");
            return Err(NavError::InvalidRoute);
        };

        self.geofences = steps
            .iter()
            .enumerate()
            .map(|(i, step)| Geofence::for_step(i, step, self.radius_meters))
            .collect();
        self.prompts = self.builder.queue(steps);
        self.progress = ProgressState {
            current_step_index: 0,
            total_steps: steps.len(),
            active: true,
        };
        self.state = NavState::Navigating;

        info!("Loaded route with {} steps", steps.len());

        Ok(RouteLoad {
            geofences: self.geofences.clone(),
            announcement,
        })
    }

    fn advance(&mut self) -> ProgressEvent {
        if self.state != NavState::Navigating {
            debug!("advance() while {}, ignoring", self.state.as_str());
            return ProgressEvent::NotNavigating;
        }

        let passed = self.progress.current_step_index;
        let next = passed + 1;

        if next < self.progress.total_steps {
            self.progress.current_step_index = next;
            let prompt = self.prompts[next].clone();
            debug!("Advanced to step {}/{}", next + 1, self.progress.total_steps);
            ProgressEvent::SpokenPrompt {
                prompt,
                retire: GeofenceId::new(passed),
            }
        } else {
            info!("Arrived after {} steps", self.progress.total_steps);
            self.arrive();
            ProgressEvent::Arrived
        }
    }

    fn region_entered(&mut self, id: GeofenceId) -> Result<ProgressEvent> {
        if self.state != NavState::Navigating {
            debug!("Region {} entered while {}, ignoring", id, self.state.as_str());
            return Ok(ProgressEvent::NotNavigating);
        }
        if !self.geofences.iter().any(|g| g.id == id) {
            warn!("Region {} is not part of the active route", id);
            return Err(NavError::UnknownGeofence(id));
        }
        if id.index() < self.progress.current_step_index {
            debug!(
                "Region {} already passed (at step {}), ignoring",
                id, self.progress.current_step_index
            );
            return Err(NavError::PassedGeofence(id));
        }

        Ok(match self.advance() {
            ProgressEvent::SpokenPrompt { prompt, .. } => {
                ProgressEvent::SpokenPrompt { prompt, retire: id }
            }
            other => other,
        })
    }

    fn clear(&mut self) {
        if self.state != NavState::Idle {
            info!("Cleared navigation from {}", self.state.as_str());
        }
        self.state = NavState::Idle;
        self.progress = ProgressState::default();
        self.geofences.clear();
        self.prompts.clear();
    }

    fn state(&self) -> NavState {
        self.state
    }

    fn progress(&self) -> ProgressState {
        self.progress
    }
}
