//! Canonical schema constants for structured logging and error reports
//!
//! These constants keep the processor, the tracing adapter and the delivery
//! client agreeing on field names and well-known keys.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_SUBMISSION_ID: &str = "submission_id";

// Fields read from incoming tracing events
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_ERROR: &str = "error";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Well-known keys in reports
pub const CUSTOM_DATA_LOG_MESSAGE: &str = "logMessage";
pub const CUSTOM_DATA_VERSION: &str = "Version";
pub const ERROR_DATA_TAGS: &str = "Tags";

/// Property name an event uses to carry an error when none is attached
pub const DEFAULT_EXCEPTION_PROPERTY: &str = "exception";

/// Type name reported for composite errors and registered as a wrapper type
pub const COMPOSITE_TYPE_NAME: &str = "CompositeError";

/// Type name given to errors synthesized from a rendered log message
pub const SYNTHETIC_TYPE_NAME: &str = "LogMessageError";

/// Target prefix of Faultline's own diagnostics; never fed back into the adapter
pub const TARGET_PREFIX: &str = "faultline";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SUPPRESSED: &str = "suppressed";
