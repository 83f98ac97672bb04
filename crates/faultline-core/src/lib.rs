//! Faultline Core - log-event to error-report pipeline
//!
//! This crate turns structured log events into error reports:
//! - Classification of an event into one error candidate
//! - One-level expansion of composite errors
//! - Message-based suppression rules
//! - Custom data and tag enrichment from diagnostic context stores
//! - Application version resolution and hand-off to an [`ErrorSink`]
//!
//! The [`layer::FaultlineLayer`] adapter feeds `tracing` events into an
//! [`EventProcessor`]; delivery lives in `faultline-client`.

pub mod config;
pub mod context;
pub mod errors;
pub mod layer;
pub mod logging_facility;
pub mod model;
pub mod pipeline;
pub mod processor;
pub mod sink;

pub use faultline_core_types::schema;

// Re-export commonly used types
pub use config::{AdapterConfig, AdapterConfigBuilder, DeliveryConfig, IgnoreLists};
pub use context::{DiagnosticContext, GlobalContext, ScopedContext};
pub use errors::{ExError, ExErrorKind, FaultlineError, Result};
pub use layer::FaultlineLayer;
pub use model::{ErrorCandidate, LogEvent, PropertyValue, Submission};
pub use processor::{EventProcessor, ProcessOutcome};
pub use sink::{ErrorSink, MemorySink};
