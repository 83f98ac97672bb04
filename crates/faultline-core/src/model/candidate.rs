use faultline_core_types::schema::{COMPOSITE_TYPE_NAME, ERROR_DATA_TAGS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Message given to composites built without one
pub const DEFAULT_COMPOSITE_MESSAGE: &str = "One or more errors occurred.";

/// Value stored in an error's Data mapping
///
/// Only `Strings` is recognised as embedded tags; every other shape under the
/// `Tags` key is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Strings(Vec<String>),
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(x) => write!(f, "{}", x),
            DataValue::Text(s) => f.write_str(s),
            DataValue::Strings(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl From<Vec<String>> for DataValue {
    fn from(value: Vec<String>) -> Self {
        DataValue::Strings(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

/// Keyed values attached to an error
pub type ErrorData = BTreeMap<String, DataValue>;

/// A single error with an optional underlying cause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleError {
    #[serde(default = "default_type_name")]
    pub type_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorCandidate>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: ErrorData,
}

fn default_type_name() -> String {
    "Error".to_string()
}

impl SimpleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            type_name: default_type_name(),
            message: message.into(),
            cause: None,
            data: ErrorData::new(),
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_cause(mut self, cause: impl Into<ErrorCandidate>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Store tags under the well-known `Tags` data key
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.with_data(ERROR_DATA_TAGS, DataValue::Strings(tags))
    }
}

/// An aggregate of independent inner errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeError {
    #[serde(default = "default_composite_message")]
    pub message: String,
    pub errors: Vec<ErrorCandidate>,
}

fn default_composite_message() -> String {
    DEFAULT_COMPOSITE_MESSAGE.to_string()
}

impl CompositeError {
    pub fn new(errors: Vec<ErrorCandidate>) -> Self {
        Self {
            message: default_composite_message(),
            errors,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// An error object to be reported
///
/// Whether an error is composite is decided when it is built, so the pipeline
/// never inspects types at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorCandidate {
    Simple(SimpleError),
    Composite(CompositeError),
}

impl ErrorCandidate {
    /// Simple error with the default type name
    pub fn simple(message: impl Into<String>) -> Self {
        ErrorCandidate::Simple(SimpleError::new(message))
    }

    /// Composite error wrapping `errors` in order
    pub fn composite(errors: Vec<ErrorCandidate>) -> Self {
        ErrorCandidate::Composite(CompositeError::new(errors))
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorCandidate::Simple(e) => &e.message,
            ErrorCandidate::Composite(c) => &c.message,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            ErrorCandidate::Simple(e) => &e.type_name,
            ErrorCandidate::Composite(_) => COMPOSITE_TYPE_NAME,
        }
    }

    /// The error's Data mapping; composites carry none
    pub fn data(&self) -> Option<&ErrorData> {
        match self {
            ErrorCandidate::Simple(e) => Some(&e.data),
            ErrorCandidate::Composite(_) => None,
        }
    }

    pub fn cause(&self) -> Option<&ErrorCandidate> {
        match self {
            ErrorCandidate::Simple(e) => e.cause.as_deref(),
            ErrorCandidate::Composite(_) => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ErrorCandidate::Composite(_))
    }

    /// Convert any error into a candidate
    ///
    /// An `ErrorCandidate` passed as `dyn Error` is recovered unchanged, so
    /// Data and composite structure survive a trip through a tracing field.
    /// Other errors become `Simple` candidates whose cause chain follows
    /// `source()`.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        if let Some(candidate) = err.downcast_ref::<ErrorCandidate>() {
            return candidate.clone();
        }
        let mut simple = SimpleError::new(err.to_string());
        if let Some(source) = err.source() {
            simple = simple.with_cause(ErrorCandidate::from_error(source));
        }
        ErrorCandidate::Simple(simple)
    }
}

impl From<SimpleError> for ErrorCandidate {
    fn from(value: SimpleError) -> Self {
        ErrorCandidate::Simple(value)
    }
}

impl From<CompositeError> for ErrorCandidate {
    fn from(value: CompositeError) -> Self {
        ErrorCandidate::Composite(value)
    }
}

impl fmt::Display for ErrorCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ErrorCandidate {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}
