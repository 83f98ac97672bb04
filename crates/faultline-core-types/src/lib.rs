//! Core types shared across Faultline crates
//!
//! This crate provides foundational types used by the event pipeline,
//! the delivery client and the CLI:
//!
//! - **Correlation types**: SubmissionId
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys, custom-data keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::SubmissionId;
pub use sensitive::Sensitive;
