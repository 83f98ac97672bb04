//! Process-wide diagnostic store

use super::DiagnosticContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// Shared key-value store visible to every thread
///
/// Wrap in an `Arc` and hand one clone to the processor; the host keeps
/// another to update values (deployment slot, machine name, ...).
///
/// # Example
///
/// ```
/// use faultline_core::context::{DiagnosticContext, GlobalContext};
///
/// let global = GlobalContext::new();
/// global.set("Environment", "staging");
/// assert_eq!(global.get("Environment"), Some("staging".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct GlobalContext {
    values: RwLock<HashMap<String, String>>,
}

impl GlobalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
    }

    /// Remove `key`, returning its previous value
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().ok().and_then(|mut v| v.remove(key))
    }

    /// Remove every key
    pub fn clear(&self) {
        if let Ok(mut values) = self.values.write() {
            values.clear();
        }
    }
}

impl DiagnosticContext for GlobalContext {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok().and_then(|v| v.get(key).cloned())
    }

    fn contains(&self, key: &str) -> bool {
        self.values
            .read()
            .map(|v| v.contains_key(key))
            .unwrap_or(false)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GlobalContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}
