use crate::model::ErrorCandidate;
use std::fmt;

/// Message rules that stop a candidate from being reported
///
/// Matching is case-sensitive. Empty rule strings are skipped, since they
/// would otherwise match every message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionRules {
    pub starts_with: Vec<String>,
    pub contains: Vec<String>,
}

/// The rule that matched a suppressed message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionMatch<'a> {
    StartsWith(&'a str),
    Contains(&'a str),
}

impl fmt::Display for SuppressionMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuppressionMatch::StartsWith(rule) => write!(f, "starts_with:{}", rule),
            SuppressionMatch::Contains(rule) => write!(f, "contains:{}", rule),
        }
    }
}

impl SuppressionRules {
    pub fn is_empty(&self) -> bool {
        self.starts_with.is_empty() && self.contains.is_empty()
    }

    /// First rule matching `message`, if any
    pub fn matching_rule(&self, message: &str) -> Option<SuppressionMatch<'_>> {
        let contains = self
            .contains
            .iter()
            .filter(|rule| !rule.is_empty())
            .find(|rule| message.contains(rule.as_str()))
            .map(|rule| SuppressionMatch::Contains(rule));
        contains.or_else(|| {
            self.starts_with
                .iter()
                .filter(|rule| !rule.is_empty())
                .find(|rule| message.starts_with(rule.as_str()))
                .map(|rule| SuppressionMatch::StartsWith(rule))
        })
    }

    pub fn suppresses(&self, candidate: &ErrorCandidate) -> bool {
        self.matching_rule(candidate.message()).is_some()
    }
}
