use crate::model::ErrorCandidate;

/// Split a composite into its inner errors, one level deep
///
/// Inner composites are returned as they are; the sink unwraps them as a
/// registered wrapper type.
pub fn expand(candidate: ErrorCandidate) -> Vec<ErrorCandidate> {
    match candidate {
        ErrorCandidate::Composite(composite) => composite.errors,
        simple => vec![simple],
    }
}
