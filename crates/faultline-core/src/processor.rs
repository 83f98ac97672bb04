//! Event processing
//!
//! [`EventProcessor`] turns one [`LogEvent`] into zero or more submissions:
//!
//! 1. classify the event into a single candidate
//! 2. expand a composite into its inner candidates (one level)
//! 3. drop candidates matched by a suppression rule
//! 4. build custom data once for the event
//! 5. derive tags per candidate, resolve the version and hand off to the sink
//!
//! Processing runs inline on the caller's thread. The only asynchronous step
//! is whatever the sink does after `send` returns.
//!
//! ## Logging
//!
//! Each call is wrapped in `log_op_start!` / `log_op_end!` under the
//! `process_event` op, with `log_op_error!` on a failed tag lookup.

use crate::config::AdapterConfig;
use crate::context::{DiagnosticContext, EmptyContext, ScopedContext};
use crate::errors::Result;
use crate::model::{ErrorCandidate, LogEvent, Submission};
use crate::pipeline::{assemble, classify, derive_tags, enrich, expand};
use crate::sink::ErrorSink;
use crate::{log_op_end, log_op_error, log_op_start};
use faultline_core_types::schema::{COMPOSITE_TYPE_NAME, EVENT_SUPPRESSED};
use std::sync::Arc;

const OP_PROCESS_EVENT: &str = "process_event";

/// Version of the crate calling the macro, for use as the host version
#[macro_export]
macro_rules! host_version {
    () => {
        env!("CARGO_PKG_VERSION")
    };
}

/// What happened to the candidates of one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub submitted: usize,
    pub suppressed: usize,
}

/// Turns log events into sink submissions
///
/// Holds no per-event state, so one processor can be shared across threads.
pub struct EventProcessor {
    config: Arc<AdapterConfig>,
    global: Arc<dyn DiagnosticContext>,
    scoped: Arc<dyn DiagnosticContext>,
    sink: Arc<dyn ErrorSink>,
    host_version: String,
}

impl EventProcessor {
    /// Create a processor and register the composite type with `sink`
    ///
    /// The global store starts empty and the scoped store reads the calling
    /// thread's [`ScopedContext`] frames.
    pub fn new(
        config: Arc<AdapterConfig>,
        sink: Arc<dyn ErrorSink>,
        host_version: impl Into<String>,
    ) -> Self {
        sink.register_wrapper_type(COMPOSITE_TYPE_NAME);
        Self {
            config,
            global: Arc::new(EmptyContext),
            scoped: Arc::new(ScopedContext),
            sink,
            host_version: host_version.into(),
        }
    }

    pub fn with_global_context(mut self, store: Arc<dyn DiagnosticContext>) -> Self {
        self.global = store;
        self
    }

    pub fn with_scoped_context(mut self, store: Arc<dyn DiagnosticContext>) -> Self {
        self.scoped = store;
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    /// Process one event
    ///
    /// # Errors
    ///
    /// Returns `ContextKeyMissing` when a configured "emit as tag" name is
    /// absent from its store. Tags for every surviving candidate are derived
    /// before anything is sent, so a failed lookup produces no submissions.
    pub fn process(&self, event: &LogEvent) -> Result<ProcessOutcome> {
        log_op_start!(OP_PROCESS_EVENT);
        let start = std::time::Instant::now();

        let outcome = self.process_impl(event).map_err(|e| {
            log_op_error!(
                OP_PROCESS_EVENT,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            OP_PROCESS_EVENT,
            duration_ms = start.elapsed().as_millis() as u64,
            submitted = outcome.submitted,
            suppressed = outcome.suppressed
        );

        Ok(outcome)
    }

    fn process_impl(&self, event: &LogEvent) -> Result<ProcessOutcome> {
        let candidate = classify(event, self.config.exception_property());
        let mut outcome = ProcessOutcome::default();

        let kept: Vec<ErrorCandidate> = expand(candidate)
            .into_iter()
            .filter(|candidate| {
                let rule = self.config.suppression().matching_rule(candidate.message());
                if let Some(rule) = &rule {
                    tracing::debug!(
                        component = module_path!(),
                        op = OP_PROCESS_EVENT,
                        event = EVENT_SUPPRESSED,
                        rule = %rule,
                        error_message = candidate.message(),
                    );
                    outcome.suppressed += 1;
                }
                rule.is_none()
            })
            .collect();

        if kept.is_empty() {
            return Ok(outcome);
        }

        let custom_data = enrich(event, &self.config, self.global.as_ref(), self.scoped.as_ref());

        let submissions = kept
            .into_iter()
            .map(|candidate| {
                let tags = derive_tags(
                    &candidate,
                    &self.config,
                    self.global.as_ref(),
                    self.scoped.as_ref(),
                )?;
                Ok(assemble(
                    candidate,
                    tags,
                    custom_data.clone(),
                    &self.host_version,
                    event.timestamp(),
                ))
            })
            .collect::<Result<Vec<Submission>>>()?;

        for submission in submissions {
            tracing::trace!(
                component = module_path!(),
                op = OP_PROCESS_EVENT,
                submission_id = %submission.id,
                tags = submission.tags.len(),
            );
            self.sink.send(submission);
            outcome.submitted += 1;
        }

        Ok(outcome)
    }
}
