//! Redacting wrapper for secrets
//!
//! The backend API key travels through config, settings and debug output;
//! `Sensitive<T>` keeps it out of all of them.

use serde::{Deserialize, Deserializer};
use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Value that renders as `***REDACTED***` under `Debug` and `Display`
///
/// ```
/// use faultline_core_types::Sensitive;
///
/// let api_key = Sensitive::new("k-123");
/// assert_eq!(format!("{:?} {}", api_key, api_key), "***REDACTED*** ***REDACTED***");
/// assert_eq!(api_key.expose(), &"k-123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The secret itself; only transports should need this
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Deserializes as the bare inner value
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Sensitive)
    }
}
