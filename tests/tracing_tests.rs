//! Tests for the events emitted at the capture point.
//!
//! Captured failures are reported at TRACE, re-raised cancellations at
//! DEBUG. Successes stay silent.

#![cfg(feature = "tracing")]

use std::fmt;
use std::sync::{Arc, Mutex};

use reaction::reaction::{Cancelled, Failure, Raise, Reaction};
use rstest::rstest;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

// =============================================================================
// Recording Layer
// =============================================================================

#[derive(Debug, Clone)]
struct RecordedEvent {
    level: Level,
    fields: Vec<(String, String)>,
}

impl RecordedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct FieldRecorder(Vec<(String, String)>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

#[derive(Clone, Default)]
struct RecordingLayer {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl RecordingLayer {
    fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &Event<'_>, _context: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        self.events.lock().unwrap().push(RecordedEvent {
            level: *event.metadata().level(),
            fields: recorder.0,
        });
    }
}

fn recorded<F: FnOnce()>(body: F) -> Vec<RecordedEvent> {
    let layer = RecordingLayer::default();
    let subscriber = Registry::default().with(layer.clone());
    tracing::subscriber::with_default(subscriber, body);
    layer.events()
}

// =============================================================================
// Capture Events
// =============================================================================

#[rstest]
fn captured_failure_is_traced() {
    let events = recorded(|| {
        let result = Reaction::<i32>::on(|| Err(Failure::illegal_state("queue closed").into()));
        assert_eq!(result, Ok(Reaction::Error(Failure::illegal_state("queue closed"))));
    });

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.level, Level::TRACE);
    assert_eq!(event.field("message"), Some("reaction captured failure"));
    assert_eq!(event.field("kind"), Some("illegal state"));
    assert_eq!(event.field("detail"), Some("queue closed"));
}

#[rstest]
fn reraised_cancellation_is_logged_at_debug() {
    let events = recorded(|| {
        let result = Reaction::success(1).map(|_| Err::<i32, Raise>(Cancelled::because("shutdown").into()));
        assert_eq!(result, Err(Cancelled::because("shutdown")));
    });

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.field("message"), Some("reaction re-raised cancellation"));
    assert_eq!(event.field("reason"), Some("shutdown"));
}

#[rstest]
fn success_emits_nothing() {
    let events = recorded(|| {
        let result = Reaction::on(|| Ok(1)).and_then(|reaction| reaction.map(|n| Ok(n + 1)));
        assert_eq!(result, Ok(Reaction::Success(2)));
    });

    assert!(events.is_empty());
}
