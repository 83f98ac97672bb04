use crate::model::{ErrorCandidate, LogEvent, PropertyValue, SimpleError};
use faultline_core_types::schema::SYNTHETIC_TYPE_NAME;

/// Decide which error an event reports
///
/// Always yields exactly one candidate, in order of preference:
/// 1. the event's attached error
/// 2. the value under `exception_property` in the property bag
/// 3. an error synthesized from the rendered message
pub fn classify(event: &LogEvent, exception_property: &str) -> ErrorCandidate {
    if let Some(error) = event.error() {
        return error.clone();
    }
    if let Some(value) = event.property(exception_property) {
        return carried_error(value);
    }
    synthesize(event)
}

/// A carried property that is not an error is reported with its text as message
fn carried_error(value: &PropertyValue) -> ErrorCandidate {
    match value {
        PropertyValue::Error(error) => error.clone(),
        other => SimpleError::new(other.to_string()).into(),
    }
}

/// Error whose message is the rendered log message, caused by the attached error if any
pub fn synthesize(event: &LogEvent) -> ErrorCandidate {
    let mut error = SimpleError::new(event.message()).with_type(SYNTHETIC_TYPE_NAME);
    if let Some(cause) = event.error() {
        error = error.with_cause(cause.clone());
    }
    error.into()
}
