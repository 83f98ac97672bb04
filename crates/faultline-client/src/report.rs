//! Reports as delivered to the backend

use crate::settings::ClientSettings;
use chrono::{DateTime, Utc};
use faultline_core::model::{ErrorCandidate, ErrorData, Submission};
use faultline_core_types::SubmissionId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Error payload of a report, with its cause chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedError {
    pub type_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: ErrorData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ReportedError>>,
    /// Inner errors of a composite that was not unwrapped
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inner: Vec<ReportedError>,
}

impl From<&ErrorCandidate> for ReportedError {
    fn from(error: &ErrorCandidate) -> Self {
        let inner = match error {
            ErrorCandidate::Composite(composite) => {
                composite.errors.iter().map(ReportedError::from).collect()
            }
            ErrorCandidate::Simple(_) => Vec::new(),
        };
        Self {
            type_name: error.type_name().to_string(),
            message: error.message().to_string(),
            data: error.data().cloned().unwrap_or_default(),
            cause: error.cause().map(|c| Box::new(ReportedError::from(c))),
            inner,
        }
    }
}

/// One error report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Shared by every report unwrapped from the same submission
    pub submission_id: SubmissionId,
    pub occurred_at: DateTime<Utc>,
    pub application_version: String,
    pub error: ReportedError,
    pub tags: Vec<String>,
    pub custom_data: BTreeMap<String, String>,
}

/// Errors left after removing registered wrapper types
///
/// A registered composite is replaced by its inner errors and a registered
/// simple error by its cause, repeatedly. Wrappers with nothing inside are
/// kept as they are.
pub fn strip_wrappers(error: ErrorCandidate, wrappers: &BTreeSet<String>) -> Vec<ErrorCandidate> {
    if !wrappers.contains(error.type_name()) {
        return vec![error];
    }
    match error {
        ErrorCandidate::Composite(composite) if !composite.errors.is_empty() => composite
            .errors
            .into_iter()
            .flat_map(|inner| strip_wrappers(inner, wrappers))
            .collect(),
        ErrorCandidate::Simple(mut simple) => match simple.cause.take() {
            Some(cause) => strip_wrappers(*cause, wrappers),
            None => vec![ErrorCandidate::Simple(simple)],
        },
        other => vec![other],
    }
}

/// Build the reports for one submission
pub fn build_reports(
    submission: Submission,
    wrappers: &BTreeSet<String>,
    settings: &ClientSettings,
) -> Vec<Report> {
    let Submission {
        id,
        error,
        tags,
        custom_data,
        application_version,
        occurred_at,
    } = submission;

    let custom_data: BTreeMap<String, String> = custom_data
        .into_iter()
        .filter(|(key, _)| !settings.is_ignored(key))
        .collect();
    let tags: Vec<String> = tags.into_iter().collect();

    strip_wrappers(error, wrappers)
        .iter()
        .map(|error| Report {
            submission_id: id.clone(),
            occurred_at,
            application_version: application_version.clone(),
            error: ReportedError::from(error),
            tags: tags.clone(),
            custom_data: custom_data.clone(),
        })
        .collect()
}
