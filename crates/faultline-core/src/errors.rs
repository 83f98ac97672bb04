use crate::context::ContextScope;
use thiserror::Error;

/// Result type alias using FaultlineError
pub type Result<T> = std::result::Result<T, FaultlineError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that hosts can match on when the
/// adapter reports a failure through the logging framework's own channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidConfig,
    ConfigParse,

    // Context lookup
    ContextKeyMissing,

    // Integration/IO
    Io,
    Serialization,
    Delivery,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::ConfigParse => "ERR_CONFIG_PARSE",
            ExErrorKind::ContextKeyMissing => "ERR_CONTEXT_KEY_MISSING",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Delivery => "ERR_DELIVERY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// A flattened view of any Faultline failure with classification fields for
/// programmatic handling and the context needed to debug it.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the context key or config field involved
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for Faultline operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaultlineError {
    /// A context name configured to be emitted as a tag has no value in its store
    #[error("{scope} diagnostic context has no value for tag key '{key}'")]
    ContextKeyMissing { scope: ContextScope, key: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration document could not be parsed
    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    /// Reading an input file failed
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization or deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A report could not be handed to or delivered by a sink
    #[error("Delivery failed: {message}")]
    Delivery { message: String },

    /// Internal error (should not happen in correct usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<FaultlineError> for ExError {
    fn from(err: FaultlineError) -> Self {
        match err {
            FaultlineError::ContextKeyMissing { scope, key } => {
                ExError::new(ExErrorKind::ContextKeyMissing)
                    .with_op("derive_tags")
                    .with_key(key)
                    .with_message(format!("{} diagnostic context key not found", scope))
            }

            FaultlineError::InvalidConfig { reason } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("validate_config")
                .with_message(reason),

            FaultlineError::ConfigParse { message } => ExError::new(ExErrorKind::ConfigParse)
                .with_op("load_config")
                .with_message(message),

            FaultlineError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_key(path)
                .with_message(message),

            FaultlineError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            FaultlineError::Delivery { message } => {
                ExError::new(ExErrorKind::Delivery).with_message(message)
            }

            FaultlineError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for FaultlineError {
    fn from(err: serde_json::Error) -> Self {
        FaultlineError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FaultlineError {
    fn from(err: toml::de::Error) -> Self {
        FaultlineError::ConfigParse {
            message: err.to_string(),
        }
    }
}
