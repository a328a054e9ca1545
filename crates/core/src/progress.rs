//! Navigation progress state and the results of advancing it.

use crate::id::GeofenceId;
use crate::prompt::Prompt;
use serde::{Deserialize, Serialize};

/// Lifecycle of a navigation session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavState {
    /// No route loaded
    #[default]
    Idle,
    /// Route loaded, stepping through it
    Navigating,
    /// Every step passed; terminal until the next route loads
    Arrived,
}

impl NavState {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NavState::Idle => "IDLE",
            NavState::Navigating => "NAVIGATING",
            NavState::Arrived => "ARRIVED",
        }
    }
}

/// Step counter of the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Step currently being driven
    pub current_step_index: usize,

    /// Steps in the loaded route
    pub total_steps: usize,

    /// Whether a session is underway
    pub active: bool,
}

impl ProgressState {
    /// Fraction of steps passed, 0.0 to 100.0.
    pub fn percentage(&self) -> f32 {
        if self.total_steps > 0 {
            (self.current_step_index as f32 / self.total_steps as f32) * 100.0
        } else {
            0.0
        }
    }

    /// Steps not yet passed.
    pub fn remaining_steps(&self) -> usize {
        self.total_steps.saturating_sub(self.current_step_index)
    }
}

/// Outcome of one region-entry notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// Speak the prompt for the new step
    SpokenPrompt {
        /// Prompt for the step now being driven
        prompt: Prompt,
        /// Geofence that was just passed and can stop being monitored
        retire: GeofenceId,
    },
    /// Last step passed; stop monitoring every geofence
    Arrived,
    /// No active route; nothing changed
    NotNavigating,
}

impl ProgressEvent {
    /// Text to speak, if this event carries a prompt.
    pub fn prompt_text(&self) -> Option<&str> {
        match self {
            ProgressEvent::SpokenPrompt { prompt, .. } => Some(&prompt.text),
            _ => None,
        }
    }
}
