//! Speech output.

use std::sync::{Arc, Mutex};
use tracing::info;

/// Fire-and-forget speech provider.
pub trait Speaker: Send + Sync {
    /// Queue `text` for playback. Does not wait for completion.
    fn speak(&self, text: &str);
}

/// Logs every utterance instead of synthesizing audio.
#[derive(Debug, Clone, Default)]
pub struct TracingSpeaker;

impl Speaker for TracingSpeaker {
    fn speak(&self, text: &str) {
        info!(target: "turnstep::speech", "{}", text);
    }
}

/// Records utterances in order. Clones share the same transcript.
#[derive(Debug, Clone, Default)]
pub struct TranscriptSpeaker {
    lines: Arc<Mutex<Vec<String>>>,
}

impl TranscriptSpeaker {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far.
    pub fn transcript(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Speaker for TranscriptSpeaker {
    fn speak(&self, text: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(text.to_string()),
            Err(poisoned) => poisoned.into_inner().push(text.to_string()),
        }
    }
}
