//! In-memory capture of Faultline's own diagnostics
//!
//! Tests install the capture once per process with [`init_test_capture`] and
//! then look up events by their `op` / `event` fields. The capture is global,
//! so tests that run in parallel should filter on an op name or field value
//! unique to the test.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded diagnostic, with every field rendered as a string
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

/// Renders strings without quotes and everything else through `Debug`
#[derive(Default)]
struct Fields(HashMap<String, String>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Store = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer appending every event to a shared buffer
pub struct TestCaptureLayer {
    store: Store,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let store = Store::default();
        (
            Self {
                store: store.clone(),
            },
            TestCapture { store },
        )
    }
}

impl<S: Subscriber> Layer<S> for TestCaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let Fields(fields) = fields;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            op: fields.get("op").cloned(),
            event: fields.get("event").cloned(),
            fields,
        };
        if let Ok(mut store) = self.store.lock() {
            store.push(captured);
        }
    }
}

/// Read side of a [`TestCaptureLayer`]
#[derive(Clone)]
pub struct TestCapture {
    store: Store,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.store.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Events with the given `op` and `event` fields
    pub fn find(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| e.is(op, event)).collect()
    }

    /// # Panics
    ///
    /// Panics when no event has the given `op` and `event` fields.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            !self.find(op, event).is_empty(),
            "no captured event with op={} event={}",
            op,
            event
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        if let Ok(mut store) = self.store.lock() {
            store.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture as the global subscriber (first call only)
///
/// ```
/// use faultline_core::log_op_start;
/// use faultline_core::logging_facility::init_test_capture;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}
