use super::candidate::ErrorCandidate;
use chrono::{DateTime, Utc};
use faultline_core_types::SubmissionId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Unique tags attached to one submission
pub type TagSet = BTreeSet<String>;

/// String key/value pairs sent alongside an error
pub type CustomData = BTreeMap<String, String>;

/// The fully enriched unit handed to an [`ErrorSink`](crate::sink::ErrorSink)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    /// Correlates processor and delivery logs for this report
    pub id: SubmissionId,

    /// The error being reported (never the composite that was expanded)
    pub error: ErrorCandidate,

    pub tags: TagSet,

    pub custom_data: CustomData,

    /// `Version` from custom data, or the host's own version
    pub application_version: String,

    /// Timestamp of the originating log event
    pub occurred_at: DateTime<Utc>,
}
