#![allow(clippy::unwrap_used, clippy::expect_used)]

use faultline_client::{BackgroundClient, ClientSettings, RecordingTransport, TransportError};
use faultline_core::config::{AdapterConfig, DeliveryConfig};
use faultline_core::model::{ErrorCandidate, LogEvent, SimpleError};
use faultline_core::processor::EventProcessor;
use faultline_core::schema::COMPOSITE_TYPE_NAME;
use faultline_core::sink::ErrorSink;
use std::sync::Arc;

fn config(max_attempts: u32) -> AdapterConfig {
    AdapterConfig::builder("k")
        .tags("svc")
        .delivery(DeliveryConfig {
            max_attempts,
            base_delay_ms: 1,
        })
        .build()
        .unwrap()
}

fn unavailable() -> TransportError {
    TransportError::Unavailable {
        message: "connection refused".to_string(),
    }
}

#[tokio::test]
async fn test_processor_submissions_are_delivered() {
    let config = Arc::new(config(3));
    let transport = Arc::new(RecordingTransport::new());
    let (client, worker) = BackgroundClient::spawn(ClientSettings::from(config.as_ref()), transport.clone());

    let processor = EventProcessor::new(config, Arc::new(client), "1.2.3");
    let outcome = processor
        .process(&LogEvent::new("checkout failed").with_property("OrderId", 42_i64))
        .unwrap();
    assert_eq!(outcome.submitted, 1);
    drop(processor);

    let stats = worker.await.unwrap();
    assert_eq!(stats.delivered, 1);
    assert_eq!(stats.failed, 0);

    let reports = transport.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].error.message, "checkout failed");
    assert_eq!(reports[0].application_version, "1.2.3");
    assert_eq!(reports[0].tags, vec!["svc"]);
    assert_eq!(reports[0].custom_data.get("OrderId").map(String::as_str), Some("42"));
}

#[tokio::test]
async fn test_processor_registers_composite_wrapper() {
    let config = Arc::new(config(1));
    let transport = Arc::new(RecordingTransport::new());
    let (client, worker) = BackgroundClient::spawn(ClientSettings::from(config.as_ref()), transport.clone());
    let probe = client.clone();

    let processor = EventProcessor::new(config, Arc::new(client), "1.0.0");
    assert_eq!(probe.wrapper_types(), vec![COMPOSITE_TYPE_NAME]);

    // a composite nested inside the expanded one is unwrapped by the client
    let nested = ErrorCandidate::composite(vec![
        ErrorCandidate::simple("inner a"),
        ErrorCandidate::simple("inner b"),
    ]);
    let event = LogEvent::new("batch")
        .with_error(ErrorCandidate::composite(vec![nested, ErrorCandidate::simple("flat")]));
    assert_eq!(processor.process(&event).unwrap().submitted, 2);

    drop(processor);
    drop(probe);
    let stats = worker.await.unwrap();

    let messages: Vec<String> = transport
        .reports()
        .iter()
        .map(|r| r.error.message.clone())
        .collect();
    assert_eq!(messages, vec!["inner a", "inner b", "flat"]);
    assert_eq!(stats.delivered, 3);
}

#[tokio::test]
async fn test_retryable_failure_is_retried() {
    let transport = Arc::new(RecordingTransport::failing(2, unavailable()));
    let (client, worker) = BackgroundClient::spawn(ClientSettings::from(&config(3)), transport.clone());

    client.send(submission("flaky"));
    drop(client);
    let stats = worker.await.unwrap();

    assert_eq!(stats.delivered, 1);
    assert_eq!(stats.attempts, 3);
    assert_eq!(transport.reports().len(), 1);
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let transport = Arc::new(RecordingTransport::failing(10, unavailable()));
    let (client, worker) = BackgroundClient::spawn(ClientSettings::from(&config(2)), transport.clone());

    client.send(submission("down"));
    drop(client);
    let stats = worker.await.unwrap();

    assert_eq!(stats.delivered, 0);
    assert_eq!(stats.failed, 1);
    assert_eq!(transport.attempts(), 2);
}

#[tokio::test]
async fn test_rejection_is_not_retried() {
    let rejected = TransportError::Rejected {
        reason: "invalid api key".to_string(),
    };
    let transport = Arc::new(RecordingTransport::failing(1, rejected));
    let (client, worker) = BackgroundClient::spawn(ClientSettings::from(&config(5)), transport.clone());

    client.send(submission("refused"));
    client.send(submission("accepted"));
    drop(client);
    let stats = worker.await.unwrap();

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.delivered, 1);
    assert_eq!(transport.attempts(), 2);
    assert_eq!(transport.reports()[0].error.message, "accepted");
}

#[tokio::test]
async fn test_send_returns_before_delivery() {
    let transport = Arc::new(RecordingTransport::new());
    let (client, worker) = BackgroundClient::spawn(ClientSettings::from(&config(1)), transport.clone());

    // current-thread runtime: the worker cannot run until this task yields
    client.send(submission("queued"));
    assert!(transport.reports().is_empty());

    drop(client);
    worker.await.unwrap();
    assert_eq!(transport.reports().len(), 1);
}

fn submission(message: &str) -> faultline_core::model::Submission {
    faultline_core::pipeline::assemble(
        SimpleError::new(message).into(),
        Default::default(),
        Default::default(),
        "0.0.0",
        chrono::Utc::now(),
    )
}
