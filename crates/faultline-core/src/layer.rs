//! `tracing` adapter
//!
//! [`FaultlineLayer`] is the logging-framework side of the processor. Each
//! `tracing` event at or above the configured minimum level becomes a
//! [`LogEvent`]:
//!
//! - the `message` field is the rendered message
//! - an error recorded under `error` is the attached error
//! - any other error-valued field becomes an error property
//! - remaining fields become text, integer, float or boolean properties
//!
//! Events whose target starts with `faultline` are ignored so the processor's
//! own diagnostics never feed back into it.
//!
//! ```no_run
//! use faultline_core::config::AdapterConfig;
//! use faultline_core::layer::FaultlineLayer;
//! use faultline_core::processor::EventProcessor;
//! use faultline_core::sink::MemorySink;
//! use std::sync::Arc;
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let config = Arc::new(AdapterConfig::builder("api-key").build().unwrap());
//! let processor = EventProcessor::new(config, Arc::new(MemorySink::new()), "1.0.0");
//! let subscriber = tracing_subscriber::registry().with(FaultlineLayer::new(processor));
//! tracing::subscriber::set_global_default(subscriber).unwrap();
//! ```

use crate::errors::ExError;
use crate::model::{ErrorCandidate, LogEvent, PropertyValue};
use crate::processor::EventProcessor;
use faultline_core_types::schema::{FIELD_ERROR, FIELD_MESSAGE, TARGET_PREFIX};
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

type FailureHandler = Arc<dyn Fn(&ExError) + Send + Sync>;

/// Layer that feeds `tracing` events to an [`EventProcessor`]
pub struct FaultlineLayer {
    processor: Arc<EventProcessor>,
    on_failure: FailureHandler,
}

impl FaultlineLayer {
    /// Wrap `processor`; failures are written to stderr
    pub fn new(processor: EventProcessor) -> Self {
        Self::from_shared(Arc::new(processor))
    }

    pub fn from_shared(processor: Arc<EventProcessor>) -> Self {
        Self {
            processor,
            on_failure: Arc::new(|err: &ExError| eprintln!("faultline: {}", err)),
        }
    }

    /// Replace the handler called when processing an event fails
    ///
    /// A subscriber cannot return errors to the code that logged, so a failed
    /// event is reported here and otherwise dropped.
    pub fn with_failure_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ExError) + Send + Sync + 'static,
    {
        self.on_failure = Arc::new(handler);
        self
    }

    pub fn processor(&self) -> &EventProcessor {
        &self.processor
    }

    fn wants(&self, event: &Event<'_>) -> bool {
        let metadata = event.metadata();
        !metadata.target().starts_with(TARGET_PREFIX)
            && *metadata.level() <= self.processor.config().min_level()
    }
}

impl<S> Layer<S> for FaultlineLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !self.wants(event) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if let Err(err) = self.processor.process(&visitor.into_log_event()) {
            (self.on_failure)(&ExError::from(err));
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    error: Option<ErrorCandidate>,
    properties: Vec<(String, PropertyValue)>,
}

impl EventVisitor {
    fn into_log_event(self) -> LogEvent {
        let mut event = LogEvent::new(self.message.unwrap_or_default());
        if let Some(error) = self.error {
            event = event.with_error(error);
        }
        self.properties
            .into_iter()
            .fold(event, |event, (name, value)| event.with_property(name, value))
    }

    fn property(&mut self, field: &Field, value: PropertyValue) {
        self.properties.push((field.name().to_string(), value));
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == FIELD_MESSAGE {
            self.message = Some(format!("{:?}", value));
        } else {
            self.property(field, PropertyValue::Text(format!("{:?}", value)));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == FIELD_MESSAGE {
            self.message = Some(value.to_string());
        } else {
            self.property(field, PropertyValue::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.property(field, PropertyValue::Integer(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let value = i64::try_from(value)
            .map(PropertyValue::Integer)
            .unwrap_or_else(|_| PropertyValue::Text(value.to_string()));
        self.property(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.property(field, PropertyValue::Float(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.property(field, PropertyValue::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        let candidate = ErrorCandidate::from_error(value);
        if field.name() == FIELD_ERROR {
            self.error = Some(candidate);
        } else {
            self.property(field, PropertyValue::Error(candidate));
        }
    }
}
