//! Diagnostic context stores
//!
//! The processor reads two key-value stores: a process-wide *global* store and
//! a call-local *scoped* store. Both are injected as [`DiagnosticContext`]
//! trait objects so hosts and tests can supply their own implementations.
//!
//! - [`GlobalContext`]: shared map, set once and read from every thread
//! - [`ScopedContext`]: thread-local frames pushed for the duration of a call
//! - `HashMap<String, String>` / `BTreeMap<String, String>`: fixed maps

pub mod global;
pub mod scoped;

pub use global::GlobalContext;
pub use scoped::{ScopeGuard, ScopedContext};

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Which diagnostic store a context name is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextScope {
    Global,
    Scoped,
}

impl fmt::Display for ContextScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextScope::Global => write!(f, "global"),
            ContextScope::Scoped => write!(f, "scoped"),
        }
    }
}

/// Read-only key-value lookup over a diagnostic store
pub trait DiagnosticContext: Send + Sync {
    /// Current value for `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Whether the store currently holds `key`
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl DiagnosticContext for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl DiagnosticContext for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Store with no entries, for hosts that do not use one of the scopes
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl DiagnosticContext for EmptyContext {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}
