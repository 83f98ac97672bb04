#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{names, processor_with};
use faultline_core::config::AdapterConfig;
use faultline_core::errors::FaultlineError;
use faultline_core::logging_facility::test_capture::init_test_capture;
use faultline_core::model::{ErrorCandidate, LogEvent};
use faultline_core::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START, EVENT_SUPPRESSED};
use faultline_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = FaultlineError::Delivery {
        message: "connection reset".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err.code"), Some("ERR_DELIVERY"));
    assert_eq!(error_events[0].level, tracing::Level::WARN);
}

#[test]
fn test_processor_logs_suppressed_candidate() {
    let capture = init_test_capture();
    let config = AdapterConfig::builder("k")
        .ignore_message_contains(names("unique-suppress-marker-4"))
        .build()
        .unwrap();
    let (processor, _sink) = processor_with(config);

    processor
        .process(
            &LogEvent::new("m")
                .with_error(ErrorCandidate::simple("boom unique-suppress-marker-4")),
        )
        .unwrap();

    let suppressed = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_SUPPRESSED)
            && e.field("rule") == Some("contains:unique-suppress-marker-4")
    });
    assert_eq!(suppressed, 1);
}

#[test]
fn test_processor_logs_error_boundary_on_missing_tag() {
    let capture = init_test_capture();
    let config = AdapterConfig::builder("k")
        .global_context_tags(names("UniqueMissingKey5"))
        .build()
        .unwrap();
    let (processor, _sink) = processor_with(config);

    assert!(processor.process(&LogEvent::new("m")).is_err());

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("process_event")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_CONTEXT_KEY_MISSING")
    });
    assert!(errors >= 1);
}
