//! Outbound seam to the error-reporting client

use crate::model::Submission;
use std::sync::Mutex;

/// Destination for finished submissions
///
/// `send` must not block on delivery: implementations enqueue the
/// submission and return. Delivery failures stay inside the sink.
pub trait ErrorSink: Send + Sync {
    /// Mark `type_name` as a wrapper the sink unwraps before reporting
    fn register_wrapper_type(&self, type_name: &str);

    /// Hand off one submission, fire-and-forget
    fn send(&self, submission: Submission);
}

/// Sink that keeps submissions in memory (for tests and dry runs)
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Mutex<Vec<Submission>>,
    wrapper_types: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Wrapper types registered so far, in registration order
    pub fn wrapper_types(&self) -> Vec<String> {
        self.wrapper_types
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }
}

impl ErrorSink for MemorySink {
    fn register_wrapper_type(&self, type_name: &str) {
        if let Ok(mut types) = self.wrapper_types.lock() {
            if !types.iter().any(|t| t == type_name) {
                types.push(type_name.to_string());
            }
        }
    }

    fn send(&self, submission: Submission) {
        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push(submission);
        }
    }
}
