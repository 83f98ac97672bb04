use crate::model::{CustomData, ErrorCandidate, Submission, TagSet};
use chrono::{DateTime, Utc};
use faultline_core_types::schema::CUSTOM_DATA_VERSION;
use faultline_core_types::SubmissionId;

/// Application version for a submission: custom data `Version`, else the host's
pub fn resolve_version(custom_data: &CustomData, host_version: &str) -> String {
    custom_data
        .get(CUSTOM_DATA_VERSION)
        .cloned()
        .unwrap_or_else(|| host_version.to_string())
}

/// Build the unit handed to the sink
pub fn assemble(
    error: ErrorCandidate,
    tags: TagSet,
    custom_data: CustomData,
    host_version: &str,
    occurred_at: DateTime<Utc>,
) -> Submission {
    let application_version = resolve_version(&custom_data, host_version);
    Submission {
        id: SubmissionId::new(),
        error,
        tags,
        custom_data,
        application_version,
        occurred_at,
    }
}
