#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{names, processor_with, store, HOST_VERSION};
use faultline_core::config::AdapterConfig;
use faultline_core::context::ScopedContext;
use faultline_core::errors::FaultlineError;
use faultline_core::model::{ErrorCandidate, LogEvent, SimpleError};
use faultline_core::processor::ProcessOutcome;
use faultline_core::schema::{COMPOSITE_TYPE_NAME, CUSTOM_DATA_LOG_MESSAGE, SYNTHETIC_TYPE_NAME};
use std::collections::BTreeSet;
use std::sync::Arc;

fn tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_empty_message_still_yields_one_synthetic_submission() {
    let (processor, sink) = processor_with(AdapterConfig::builder("k").build().unwrap());

    let outcome = processor.process(&LogEvent::new("")).unwrap();

    assert_eq!(outcome, ProcessOutcome { submitted: 1, suppressed: 0 });
    let sent = sink.submissions();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].error.message(), "");
    assert_eq!(sent[0].error.type_name(), SYNTHETIC_TYPE_NAME);
}

#[test]
fn test_composite_expands_to_inner_errors_in_order() {
    let (processor, sink) = processor_with(AdapterConfig::builder("k").build().unwrap());
    let inner = vec![
        ErrorCandidate::simple("first"),
        ErrorCandidate::simple("second"),
        ErrorCandidate::simple("third"),
    ];
    let event = LogEvent::new("batch").with_error(ErrorCandidate::composite(inner));

    processor.process(&event).unwrap();

    let messages: Vec<String> = sink
        .submissions()
        .iter()
        .map(|s| s.error.message().to_string())
        .collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert!(sink.submissions().iter().all(|s| !s.error.is_composite()));
}

#[test]
fn test_nested_composite_is_expanded_one_level() {
    let (processor, sink) = processor_with(AdapterConfig::builder("k").build().unwrap());
    let nested = ErrorCandidate::composite(vec![ErrorCandidate::simple("deep")]);
    let event = LogEvent::new("batch").with_error(ErrorCandidate::composite(vec![
        nested.clone(),
        ErrorCandidate::simple("flat"),
    ]));

    processor.process(&event).unwrap();

    let sent = sink.submissions();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].error, nested);
    assert_eq!(sent[0].error.type_name(), COMPOSITE_TYPE_NAME);
}

#[test]
fn test_contains_rule_suppresses_matching_message_only() {
    let config = AdapterConfig::builder("k")
        .ignore_message_contains(names("timeout"))
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);

    let suppressed = LogEvent::new("m").with_error(ErrorCandidate::simple("connection timeout"));
    let kept = LogEvent::new("m").with_error(ErrorCandidate::simple("connection refused"));

    assert_eq!(
        processor.process(&suppressed).unwrap(),
        ProcessOutcome { submitted: 0, suppressed: 1 }
    );
    assert_eq!(
        processor.process(&kept).unwrap(),
        ProcessOutcome { submitted: 1, suppressed: 0 }
    );
    let sent = sink.submissions();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].error.message(), "connection refused");
}

#[test]
fn test_starts_with_rule_is_case_sensitive_prefix() {
    let config = AdapterConfig::builder("k")
        .ignore_message_starts_with(names("Health"))
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);

    processor
        .process(&LogEvent::new("m").with_error(ErrorCandidate::simple("Health check failed")))
        .unwrap();
    processor
        .process(&LogEvent::new("m").with_error(ErrorCandidate::simple("health check failed")))
        .unwrap();
    processor
        .process(&LogEvent::new("m").with_error(ErrorCandidate::simple("db Health degraded")))
        .unwrap();

    assert_eq!(sink.submissions().len(), 2);
}

#[test]
fn test_embedded_and_static_tags_are_deduplicated() {
    let config = AdapterConfig::builder("k").tags("b,c").build().unwrap();
    let (processor, sink) = processor_with(config);
    let error = SimpleError::new("boom").with_tags(["a", "b"]);

    processor
        .process(&LogEvent::new("m").with_error(error))
        .unwrap();

    assert_eq!(sink.submissions()[0].tags, tag_set(&["a", "b", "c"]));
}

#[test]
fn test_context_tags_join_the_tag_set() {
    let config = AdapterConfig::builder("k")
        .global_context_tags(names("Region"))
        .scoped_context_tags(names("Tenant"))
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);
    let processor = processor
        .with_global_context(store(&[("Region", "eu-west")]))
        .with_scoped_context(store(&[("Tenant", "acme")]));

    processor.process(&LogEvent::new("m")).unwrap();

    assert_eq!(sink.submissions()[0].tags, tag_set(&["eu-west", "acme"]));
}

#[test]
fn test_version_from_custom_data() {
    let (processor, sink) = processor_with(AdapterConfig::builder("k").build().unwrap());

    processor
        .process(&LogEvent::new("m").with_property("Version", "2.3.1"))
        .unwrap();

    assert_eq!(sink.submissions()[0].application_version, "2.3.1");
}

#[test]
fn test_version_falls_back_to_host() {
    let (processor, sink) = processor_with(AdapterConfig::builder("k").build().unwrap());

    processor.process(&LogEvent::new("m")).unwrap();

    assert_eq!(sink.submissions()[0].application_version, HOST_VERSION);
}

#[test]
fn test_missing_scoped_tag_key_is_fatal() {
    let config = AdapterConfig::builder("k")
        .scoped_context_tags(names("RequestId"))
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);
    let processor = processor.with_scoped_context(store(&[]));

    let err = processor.process(&LogEvent::new("m")).unwrap_err();

    assert!(matches!(
        err,
        FaultlineError::ContextKeyMissing { ref key, .. } if key == "RequestId"
    ));
    assert!(sink.submissions().is_empty());
}

#[test]
fn test_missing_scoped_data_key_is_skipped() {
    let config = AdapterConfig::builder("k")
        .scoped_context_data(names("RequestId"))
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);
    let processor = processor.with_scoped_context(store(&[]));

    processor.process(&LogEvent::new("m")).unwrap();

    let sent = sink.submissions();
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].custom_data.contains_key("RequestId"));
    assert_eq!(
        sent[0].custom_data.get(CUSTOM_DATA_LOG_MESSAGE).map(String::as_str),
        Some("m")
    );
}

#[test]
fn test_context_data_overwrites_seed_on_collision() {
    let config = AdapterConfig::builder("k")
        .global_context_data(names(CUSTOM_DATA_LOG_MESSAGE))
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);
    let processor =
        processor.with_global_context(store(&[(CUSTOM_DATA_LOG_MESSAGE, "from context")]));

    processor.process(&LogEvent::new("rendered")).unwrap();

    assert_eq!(
        sink.submissions()[0]
            .custom_data
            .get(CUSTOM_DATA_LOG_MESSAGE)
            .map(String::as_str),
        Some("from context")
    );
}

#[test]
fn test_default_scoped_store_reads_thread_frames() {
    let config = AdapterConfig::builder("k")
        .scoped_context_tags(names("RequestId"))
        .scoped_context_data(names("RequestId"))
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);

    {
        let _scope = ScopedContext::push([("RequestId", "r-77")]);
        processor.process(&LogEvent::new("inside scope")).unwrap();
    }
    assert!(processor.process(&LogEvent::new("outside scope")).is_err());

    let sent = sink.submissions();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].tags.contains("r-77"));
    assert_eq!(
        sent[0].custom_data.get("RequestId").map(String::as_str),
        Some("r-77")
    );
}

#[test]
fn test_carried_exception_property_is_the_candidate() {
    let config = AdapterConfig::builder("k")
        .exception_property("Failure")
        .build()
        .unwrap();
    let (processor, sink) = processor_with(config);
    let event = LogEvent::new("rendered")
        .with_property("Failure", ErrorCandidate::simple("carried"));

    processor.process(&event).unwrap();

    assert_eq!(sink.submissions()[0].error.message(), "carried");
}

#[test]
fn test_processor_is_shareable_across_threads() {
    let (processor, sink) = processor_with(AdapterConfig::builder("k").build().unwrap());
    let processor = Arc::new(processor);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let processor = processor.clone();
            std::thread::spawn(move || {
                processor
                    .process(&LogEvent::new(format!("thread {}", i)))
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.submissions().len(), 4);
}
