//! Delivery transports

use crate::errors::TransportError;
use crate::report::Report;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Sends one report to the backend
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, report: &Report) -> Result<(), TransportError>;
}

/// Transport that keeps delivered reports in memory
///
/// Can be told to fail a number of attempts first, for exercising retries.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    reports: Mutex<Vec<Report>>,
    failures_left: AtomicU32,
    failure: Option<TransportError>,
    attempts: AtomicU32,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first `count` attempts with `error`
    pub fn failing(count: u32, error: TransportError) -> Self {
        Self {
            failures_left: AtomicU32::new(count),
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Every call to `deliver`, successful or not
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, report: &Report) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.failure {
            let should_fail = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if should_fail {
                return Err(error.clone());
            }
        }

        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report.clone());
        }
        Ok(())
    }
}
