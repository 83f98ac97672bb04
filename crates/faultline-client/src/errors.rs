use faultline_core::errors::FaultlineError;
use thiserror::Error;

/// Failure reported by a [`Transport`](crate::transport::Transport)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The backend could not be reached or timed out; worth retrying
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },

    /// The backend refused the report; retrying will not help
    #[error("report rejected: {reason}")]
    Rejected { reason: String },

    /// The report could not be encoded
    #[error("report encoding failed: {message}")]
    Encoding { message: String },
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Unavailable { .. })
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Encoding {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Unavailable {
            message: err.to_string(),
        }
    }
}

impl From<TransportError> for FaultlineError {
    fn from(err: TransportError) -> Self {
        FaultlineError::Delivery {
            message: err.to_string(),
        }
    }
}
