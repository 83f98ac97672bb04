//! Background delivery client
//!
//! `send` pushes the submission onto an unbounded channel and returns at
//! once. A single worker task drains the channel in order, so reports from
//! one thread reach the transport in the order they were sent.
//!
//! The worker exits when every [`BackgroundClient`] handle has been dropped
//! and the queue is empty, yielding the [`DeliveryStats`] for its lifetime.

use crate::report::{build_reports, Report};
use crate::settings::ClientSettings;
use crate::transport::Transport;
use faultline_core::errors::FaultlineError;
use faultline_core::model::Submission;
use faultline_core::sink::ErrorSink;
use faultline_core::{log_op_end, log_op_error, log_op_start};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const OP_DELIVER_REPORT: &str = "deliver_report";

/// Counters kept by the delivery worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Reports the transport accepted
    pub delivered: u64,
    /// Reports dropped after the last attempt failed
    pub failed: u64,
    /// Transport calls, including retries
    pub attempts: u64,
}

/// [`ErrorSink`] that delivers in a background tokio task
#[derive(Clone)]
pub struct BackgroundClient {
    tx: mpsc::UnboundedSender<Submission>,
    wrapper_types: Arc<RwLock<BTreeSet<String>>>,
}

impl BackgroundClient {
    /// Start the delivery worker on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(
        settings: ClientSettings,
        transport: Arc<dyn Transport>,
    ) -> (Self, JoinHandle<DeliveryStats>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let wrapper_types = Arc::new(RwLock::new(BTreeSet::new()));

        let worker = Worker {
            settings,
            transport,
            wrapper_types: wrapper_types.clone(),
            stats: DeliveryStats::default(),
        };
        let handle = tokio::spawn(worker.run(rx));

        (Self { tx, wrapper_types }, handle)
    }

    /// Wrapper types registered so far
    pub fn wrapper_types(&self) -> Vec<String> {
        self.wrapper_types
            .read()
            .map(|types| types.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl ErrorSink for BackgroundClient {
    fn register_wrapper_type(&self, type_name: &str) {
        if let Ok(mut types) = self.wrapper_types.write() {
            types.insert(type_name.to_string());
        }
    }

    fn send(&self, submission: Submission) {
        let id = submission.id.clone();
        if self.tx.send(submission).is_err() {
            tracing::warn!(
                component = module_path!(),
                op = OP_DELIVER_REPORT,
                submission_id = %id,
                "delivery worker has stopped; submission dropped"
            );
        }
    }
}

struct Worker {
    settings: ClientSettings,
    transport: Arc<dyn Transport>,
    wrapper_types: Arc<RwLock<BTreeSet<String>>>,
    stats: DeliveryStats,
}

impl Worker {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Submission>) -> DeliveryStats {
        while let Some(submission) = rx.recv().await {
            let wrappers = self
                .wrapper_types
                .read()
                .map(|types| types.clone())
                .unwrap_or_default();

            for report in build_reports(submission, &wrappers, &self.settings) {
                self.deliver(&report).await;
            }
        }
        self.stats
    }

    /// Deliver with exponential backoff, giving up after the configured attempts
    async fn deliver(&mut self, report: &Report) {
        log_op_start!(OP_DELIVER_REPORT, submission_id = %report.submission_id);
        let start = std::time::Instant::now();
        let max_attempts = self.settings.delivery.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            self.stats.attempts += 1;
            match self.transport.deliver(report).await {
                Ok(()) => {
                    self.stats.delivered += 1;
                    log_op_end!(
                        OP_DELIVER_REPORT,
                        duration_ms = start.elapsed().as_millis() as u64,
                        submission_id = %report.submission_id,
                        attempts = attempt
                    );
                    return;
                }
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = backoff(self.settings.delivery.base_delay(), attempt);
                    tracing::debug!(
                        component = module_path!(),
                        op = OP_DELIVER_REPORT,
                        submission_id = %report.submission_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying delivery"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    self.stats.failed += 1;
                    log_op_error!(
                        OP_DELIVER_REPORT,
                        FaultlineError::from(err),
                        duration_ms = start.elapsed().as_millis() as u64,
                        submission_id = %report.submission_id,
                        attempts = attempt
                    );
                    return;
                }
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based): base, 2x base, 4x base, ...
fn backoff(base: Duration, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    base.saturating_mul(1 << exponent)
}
