//! Pipeline stages run for every incoming log event
//!
//! The stages are plain functions so each can be exercised on its own; the
//! [`EventProcessor`](crate::processor::EventProcessor) chains them:
//!
//! classify → expand → (per candidate) suppress → tags → submit,
//! with custom data built once per event by [`enrich`].

pub mod classify;
pub mod enrich;
pub mod expand;
pub mod submit;
pub mod suppress;
pub mod tags;

pub use classify::classify;
pub use enrich::enrich;
pub use expand::expand;
pub use submit::{assemble, resolve_version};
pub use suppress::{SuppressionMatch, SuppressionRules};
pub use tags::{context_tags, derive_tags, embedded_tags};
