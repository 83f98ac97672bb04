use super::candidate::ErrorCandidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value in a log event's property bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Error(ErrorCandidate),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<ErrorCandidate> for PropertyValue {
    fn from(value: ErrorCandidate) -> Self {
        PropertyValue::Error(value)
    }
}

/// One structured record delivered by the logging framework
///
/// Built once by the producer and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorCandidate>,
    #[serde(default)]
    properties: BTreeMap<String, PropertyValue>,
    #[serde(default = "Utc::now")]
    timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Create an event with a rendered message, timestamped now
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
            properties: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach an error object
    pub fn with_error(mut self, error: impl Into<ErrorCandidate>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Add a property, replacing any previous value under `name`
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The rendered message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&ErrorCandidate> {
        self.error.as_ref()
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
