//! Replay recorded traces into a session channel.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use turnstep_core::LocationTrace;

use crate::LocationEvent;

/// Turn a trace into the event sequence a live provider would emit.
///
/// Each fix contributes its heading reading (if any) followed by its position.
pub fn trace_events(trace: &LocationTrace) -> Vec<LocationEvent> {
    let mut events = Vec::with_capacity(trace.len() * 2);
    for fix in &trace.fixes {
        if let Some(heading) = fix.heading {
            events.push(LocationEvent::Heading(heading));
        }
        events.push(LocationEvent::Location(fix.coordinate));
    }
    events
}

/// Spawn a task that feeds `trace` into a new channel, pausing `interval`
/// between fixes. The channel closes once the trace is exhausted or the
/// receiver is dropped.
pub fn spawn_replay(
    trace: LocationTrace,
    interval: Duration,
    capacity: usize,
) -> (mpsc::Receiver<LocationEvent>, JoinHandle<usize>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));

    let handle = tokio::spawn(async move {
        let mut sent = 0;
        for event in trace_events(&trace) {
            let is_fix = matches!(event, LocationEvent::Location(_));
            if tx.send(event).await.is_err() {
                debug!("Replay receiver dropped after {} events", sent);
                break;
            }
            sent += 1;
            if is_fix && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        }
        sent
    });

    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstep_core::{Coordinate, HeadingReading, LocationFix};

    fn trace() -> LocationTrace {
        let mut trace = LocationTrace::from_coordinates(vec![
            Coordinate::new(37.0, -122.0).unwrap(),
            Coordinate::new(37.005, -122.0).unwrap(),
        ]);
        trace.fixes.push(LocationFix {
            coordinate: Coordinate::new(37.014, -122.0).unwrap(),
            heading: Some(HeadingReading {
                true_heading: 5.0,
                magnetic_heading: 0.0,
                accuracy: 2.0,
            }),
            recorded_at: None,
        });
        trace
    }

    #[test]
    fn test_trace_events_order() {
        let events = trace_events(&trace());
        assert_eq!(events.len(), 4);
        assert!(matches!(events[2], LocationEvent::Heading(_)));
        assert!(matches!(events[3], LocationEvent::Location(_)));
    }

    #[tokio::test]
    async fn test_spawn_replay_delivers_everything() {
        let (mut rx, handle) = spawn_replay(trace(), Duration::ZERO, 2);

        let mut received = Vec::new();
        while let Some(event) = rx.recv().await {
            received.push(event);
        }

        assert_eq!(received, trace_events(&trace()));
        assert_eq!(handle.await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_demo_trace_reaches_destination() {
        use crate::{CircularRegionMonitor, NavigationSession, TranscriptSpeaker};
        use turnstep_core::Route;

        let route: Route =
            serde_json::from_str(include_str!("../../../demos/ferry-route.json")).unwrap();
        let trace: LocationTrace =
            serde_json::from_str(include_str!("../../../demos/ferry-trace.json")).unwrap();

        let speaker = TranscriptSpeaker::new();
        let mut session = NavigationSession::new(CircularRegionMonitor::new(), speaker.clone());
        session.start(&route).unwrap();

        let (rx, _handle) = spawn_replay(trace, Duration::ZERO, 8);
        let summary = session.run(rx).await;

        assert!(summary.arrived);
        assert_eq!(session.tracker().heading(), Some(13.0));
        assert_eq!(
            speaker.transcript().last().map(String::as_str),
            Some("Arrived at destination.")
        );
        assert_eq!(speaker.transcript()[1], "In 1000 meters, Turn left onto The Embarcadero.");
    }
}
