//! Faultline Client - background delivery of error reports
//!
//! [`BackgroundClient`] is the [`ErrorSink`](faultline_core::sink::ErrorSink)
//! used in production. `send` only enqueues; a worker task unwraps registered
//! wrapper types, turns each submission into [`Report`]s and delivers them
//! through a [`Transport`] with bounded retries.

pub mod client;
pub mod errors;
pub mod report;
pub mod settings;
pub mod transport;

pub use client::{BackgroundClient, DeliveryStats};
pub use errors::TransportError;
pub use report::{Report, ReportedError};
pub use settings::ClientSettings;
pub use transport::{RecordingTransport, Transport};
