//! Structured logging facility for Faultline
//!
//! This module provides Faultline's own diagnostics:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Every event logged here has a target under `faultline`, which the
//! [`FaultlineLayer`](crate::layer::FaultlineLayer) skips so the adapter never
//! reports its own diagnostics.
//!
//! # Usage
//!
//! ```rust
//! use faultline_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
