//! Navigation session - drives the tracker from location events.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use turnstep_core::{
    Coordinate, GeofenceId, HeadingReading, NavError, NavState, NavigationConfig, ProgressEvent,
    ProgressState, Route, SessionId, Time,
};
use turnstep_progress::{ProgressTracker, StepTracker};

use crate::{GeofenceMonitor, SessionError, Speaker};

/// Configuration for a navigation session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Stop `run` as soon as the destination is reached
    pub stop_on_arrival: bool,
    /// Max events to handle before stopping (None = until the channel closes)
    pub max_events: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stop_on_arrival: true,
            max_events: None,
        }
    }
}

/// Something the location provider reported.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// New position fix
    Location(Coordinate),
    /// New compass reading
    Heading(HeadingReading),
    /// The platform monitor reported entering a region
    EnteredRegion(GeofenceId),
}

/// Outcome of a finished `run`.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Session identifier
    pub session_id: SessionId,
    /// When the route was loaded
    pub started_at: Option<Time>,
    /// When `run` returned
    pub finished_at: Time,
    /// Events consumed from the channel
    pub events_handled: usize,
    /// Prompts handed to the speaker, opening and arrival included
    pub prompts_spoken: usize,
    /// Whether the destination was reached
    pub arrived: bool,
    /// Tracker state at the end
    pub final_state: NavState,
    /// Step counter at the end
    pub final_progress: ProgressState,
}

/// Glue between a tracker, a geofence monitor and a speaker.
///
/// Runs the loop:
/// ```text
/// location fix → monitor.observe → tracker.region_entered → speak / retire / stop all
/// ```
pub struct NavigationSession<M: GeofenceMonitor, S: Speaker> {
    id: SessionId,
    tracker: StepTracker,
    monitor: M,
    speaker: S,
    config: SessionConfig,
    started_at: Option<Time>,
    prompts_spoken: usize,
    arrived: bool,
}

impl<M: GeofenceMonitor, S: Speaker> NavigationSession<M, S> {
    /// Create a session with default navigation config.
    pub fn new(monitor: M, speaker: S) -> Self {
        Self {
            id: SessionId::new(),
            tracker: StepTracker::new(),
            monitor,
            speaker,
            config: SessionConfig::default(),
            started_at: None,
            prompts_spoken: 0,
            arrived: false,
        }
    }

    /// Set the navigation config (unit, lookahead, radius).
    pub fn with_navigation(mut self, config: &NavigationConfig) -> Self {
        self.tracker = StepTracker::with_config(config);
        self
    }

    /// Set the session configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Current session id; a new one is issued by every `start`.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The underlying tracker.
    pub fn tracker(&self) -> &StepTracker {
        &self.tracker
    }

    /// The geofence monitor.
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    /// The speech provider.
    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    /// Load `route`, swap monitored regions, and speak the opening announcement.
    ///
    /// An empty route is rejected and leaves the current session untouched.
    pub fn start(&mut self, route: &Route) -> Result<(), SessionError> {
        let load = self.tracker.load_route(&route.steps)?;

        self.monitor.stop_all();
        self.monitor.start_monitoring(&load.geofences);

        self.id = SessionId::new();
        self.started_at = Some(chrono::Utc::now());
        self.arrived = false;
        info!(
            "Session {} started: {} ({} steps)",
            self.id,
            route.name.as_deref().unwrap_or("unnamed route"),
            route.steps.len()
        );

        self.say(&load.announcement.text);
        Ok(())
    }

    /// Handle one location event, returning the progress events it produced.
    pub fn handle(&mut self, event: LocationEvent) -> Result<Vec<ProgressEvent>, SessionError> {
        match event {
            LocationEvent::Location(location) => {
                self.tracker.record_location(location);
                let entered = self.monitor.observe(&location);
                let mut events = Vec::with_capacity(entered.len());
                for id in entered {
                    events.extend(self.region_entered(id)?);
                }
                Ok(events)
            }
            LocationEvent::Heading(reading) => {
                self.tracker.record_heading(reading);
                Ok(Vec::new())
            }
            LocationEvent::EnteredRegion(id) => Ok(self.region_entered(id)?.into_iter().collect()),
        }
    }

    /// Abandon the route: clear the tracker and stop all monitoring.
    pub fn cancel(&mut self) {
        self.tracker.clear();
        self.monitor.stop_all();
        info!("Session {} cancelled", self.id);
    }

    /// Consume events until the channel closes, the destination is reached
    /// (with `stop_on_arrival`), or `max_events` is hit.
    pub async fn run(&mut self, mut events: mpsc::Receiver<LocationEvent>) -> SessionSummary {
        let mut handled = 0;

        while let Some(event) = events.recv().await {
            handled += 1;

            match self.handle(event) {
                Ok(progress) => {
                    let arrived = progress.iter().any(|e| *e == ProgressEvent::Arrived);
                    if arrived && self.config.stop_on_arrival {
                        debug!("Stopping session loop on arrival");
                        break;
                    }
                }
                Err(e) => warn!("Ignoring location event: {}", e),
            }

            if let Some(max) = self.config.max_events {
                if handled >= max {
                    debug!("Reached max events ({})", max);
                    break;
                }
            }
        }

        SessionSummary {
            session_id: self.id,
            started_at: self.started_at,
            finished_at: chrono::Utc::now(),
            events_handled: handled,
            prompts_spoken: self.prompts_spoken,
            arrived: self.arrived,
            final_state: self.tracker.state(),
            final_progress: self.tracker.progress(),
        }
    }

    /// Feed one region entry to the tracker. Repeated entries for a step
    /// already passed produce no event.
    fn region_entered(&mut self, id: GeofenceId) -> Result<Option<ProgressEvent>, SessionError> {
        let event = match self.tracker.region_entered(id) {
            Ok(event) => event,
            Err(NavError::PassedGeofence(id)) => {
                debug!("Dropping repeated entry for passed region {}", id);
                self.monitor.stop_monitoring(id);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match &event {
            ProgressEvent::SpokenPrompt { prompt, retire } => {
                self.monitor.stop_monitoring(*retire);
                self.say(&prompt.text);
            }
            ProgressEvent::Arrived => {
                self.monitor.stop_all();
                self.arrived = true;
                let arrival = self.tracker.announcer().arrival().to_string();
                self.say(&arrival);
            }
            ProgressEvent::NotNavigating => {}
        }

        Ok(Some(event))
    }

    fn say(&mut self, text: &str) {
        self.speaker.speak(text);
        self.prompts_spoken += 1;
    }
}
