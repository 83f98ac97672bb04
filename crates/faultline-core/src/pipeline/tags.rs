use crate::config::{AdapterConfig, ContextNames};
use crate::context::{ContextScope, DiagnosticContext};
use crate::errors::{FaultlineError, Result};
use crate::model::{DataValue, ErrorCandidate, TagSet};
use faultline_core_types::schema::ERROR_DATA_TAGS;

/// Tags stored in the error's Data under `Tags`
///
/// Anything other than a list of strings contributes nothing.
pub fn embedded_tags(candidate: &ErrorCandidate) -> Vec<String> {
    match candidate.data().and_then(|data| data.get(ERROR_DATA_TAGS)) {
        Some(DataValue::Strings(tags)) => tags.clone(),
        _ => Vec::new(),
    }
}

/// Current values of the "emit as tag" names for one store
///
/// Blank names are skipped. A name missing from the store fails the lookup;
/// unlike custom-data enrichment there is no existence check.
pub fn context_tags(
    names: &[String],
    store: &dyn DiagnosticContext,
    scope: ContextScope,
) -> Result<Vec<String>> {
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            store
                .get(name)
                .ok_or_else(|| FaultlineError::ContextKeyMissing {
                    scope,
                    key: name.clone(),
                })
        })
        .collect()
}

/// Deduplicated union of embedded, static and context-derived tags
pub fn derive_tags(
    candidate: &ErrorCandidate,
    config: &AdapterConfig,
    global: &dyn DiagnosticContext,
    scoped: &dyn DiagnosticContext,
) -> Result<TagSet> {
    let mut tags: TagSet = embedded_tags(candidate).into_iter().collect();
    tags.extend(config.static_tags().iter().cloned());
    tags.extend(tags_for(config.global_context(), global, ContextScope::Global)?);
    tags.extend(tags_for(config.scoped_context(), scoped, ContextScope::Scoped)?);
    Ok(tags)
}

fn tags_for(
    names: &ContextNames,
    store: &dyn DiagnosticContext,
    scope: ContextScope,
) -> Result<Vec<String>> {
    context_tags(&names.tags, store, scope)
}
