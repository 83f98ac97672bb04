//! Adapter configuration
//!
//! A TOML document (or the programmatic [`AdapterConfigBuilder`]) is validated
//! once into an immutable [`AdapterConfig`] that the processor, the tracing
//! layer and the delivery client share by reference.
//!
//! ```toml
//! api_key = "k-123"
//! tags = "web,production"
//! ignore_message_contains = ["timeout"]
//! scoped_context_tags = ["RequestId"]
//!
//! [delivery]
//! max_attempts = 5
//! ```

use crate::errors::{FaultlineError, Result};
use crate::pipeline::suppress::SuppressionRules;
use faultline_core_types::schema::DEFAULT_EXCEPTION_PROPERTY;
use faultline_core_types::Sensitive;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// Context names read from one diagnostic store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextNames {
    /// Copied into custom data when present
    pub data: Vec<String>,
    /// Emitted as tags; must be present
    pub tags: Vec<String>,
}

/// Request-data names the backend client must not transmit
///
/// Passed through to sink construction; the pipeline never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreLists {
    pub form_fields: Vec<String>,
    pub cookies: Vec<String>,
    pub headers: Vec<String>,
    pub server_variables: Vec<String>,
}

/// Background delivery tuning for the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    200
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl DeliveryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// Validated, immutable adapter configuration
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    api_key: Sensitive<String>,
    static_tags: Vec<String>,
    ignore: IgnoreLists,
    suppression: SuppressionRules,
    global_context: ContextNames,
    scoped_context: ContextNames,
    exception_property: String,
    min_level: Level,
    delivery: DeliveryConfig,
}

impl AdapterConfig {
    pub fn builder(api_key: impl Into<String>) -> AdapterConfigBuilder {
        AdapterConfigBuilder::new(api_key)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        raw.into_builder().build()
    }

    /// Read, parse and validate a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FaultlineError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn api_key(&self) -> &Sensitive<String> {
        &self.api_key
    }

    /// Static tags, already split on commas
    pub fn static_tags(&self) -> &[String] {
        &self.static_tags
    }

    pub fn ignore(&self) -> &IgnoreLists {
        &self.ignore
    }

    pub fn suppression(&self) -> &SuppressionRules {
        &self.suppression
    }

    pub fn global_context(&self) -> &ContextNames {
        &self.global_context
    }

    pub fn scoped_context(&self) -> &ContextNames {
        &self.scoped_context
    }

    /// Property name that carries an error when none is attached
    pub fn exception_property(&self) -> &str {
        &self.exception_property
    }

    /// Least severe level the tracing layer forwards
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn delivery(&self) -> DeliveryConfig {
        self.delivery
    }
}

/// Programmatic construction with the same validation as file loading
#[derive(Debug, Clone)]
pub struct AdapterConfigBuilder {
    api_key: String,
    tags: String,
    ignore_form_field_names: String,
    ignore_cookie_names: String,
    ignore_header_names: String,
    ignore_server_variable_names: String,
    suppression: SuppressionRules,
    global_context: ContextNames,
    scoped_context: ContextNames,
    exception_property: String,
    min_level: String,
    delivery: DeliveryConfig,
}

impl AdapterConfigBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            tags: String::new(),
            ignore_form_field_names: String::new(),
            ignore_cookie_names: String::new(),
            ignore_header_names: String::new(),
            ignore_server_variable_names: String::new(),
            suppression: SuppressionRules::default(),
            global_context: ContextNames::default(),
            scoped_context: ContextNames::default(),
            exception_property: DEFAULT_EXCEPTION_PROPERTY.to_string(),
            min_level: default_min_level(),
            delivery: DeliveryConfig::default(),
        }
    }

    /// Comma-separated static tags
    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn ignore_form_field_names(mut self, names: impl Into<String>) -> Self {
        self.ignore_form_field_names = names.into();
        self
    }

    pub fn ignore_cookie_names(mut self, names: impl Into<String>) -> Self {
        self.ignore_cookie_names = names.into();
        self
    }

    pub fn ignore_header_names(mut self, names: impl Into<String>) -> Self {
        self.ignore_header_names = names.into();
        self
    }

    pub fn ignore_server_variable_names(mut self, names: impl Into<String>) -> Self {
        self.ignore_server_variable_names = names.into();
        self
    }

    pub fn ignore_message_starts_with(mut self, rules: Vec<String>) -> Self {
        self.suppression.starts_with = rules;
        self
    }

    pub fn ignore_message_contains(mut self, rules: Vec<String>) -> Self {
        self.suppression.contains = rules;
        self
    }

    pub fn global_context_data(mut self, names: Vec<String>) -> Self {
        self.global_context.data = names;
        self
    }

    pub fn global_context_tags(mut self, names: Vec<String>) -> Self {
        self.global_context.tags = names;
        self
    }

    pub fn scoped_context_data(mut self, names: Vec<String>) -> Self {
        self.scoped_context.data = names;
        self
    }

    pub fn scoped_context_tags(mut self, names: Vec<String>) -> Self {
        self.scoped_context.tags = names;
        self
    }

    pub fn exception_property(mut self, name: impl Into<String>) -> Self {
        self.exception_property = name.into();
        self
    }

    pub fn min_level(mut self, level: impl Into<String>) -> Self {
        self.min_level = level.into();
        self
    }

    pub fn delivery(mut self, delivery: DeliveryConfig) -> Self {
        self.delivery = delivery;
        self
    }

    /// Validate and freeze the configuration
    pub fn build(self) -> Result<AdapterConfig> {
        if self.api_key.trim().is_empty() {
            return Err(invalid("api_key must not be blank"));
        }
        if self.exception_property.trim().is_empty() {
            return Err(invalid("exception_property must not be blank"));
        }
        if self.delivery.max_attempts == 0 {
            return Err(invalid("delivery.max_attempts must be at least 1"));
        }
        let min_level = Level::from_str(self.min_level.trim())
            .map_err(|_| invalid(&format!("unknown min_level '{}'", self.min_level)))?;

        Ok(AdapterConfig {
            api_key: Sensitive::new(self.api_key),
            static_tags: split_tags(&self.tags),
            ignore: IgnoreLists {
                form_fields: split_values(&self.ignore_form_field_names),
                cookies: split_values(&self.ignore_cookie_names),
                headers: split_values(&self.ignore_header_names),
                server_variables: split_values(&self.ignore_server_variable_names),
            },
            suppression: self.suppression,
            global_context: self.global_context,
            scoped_context: self.scoped_context,
            exception_property: self.exception_property,
            min_level,
            delivery: self.delivery,
        })
    }
}

fn invalid(reason: &str) -> FaultlineError {
    FaultlineError::InvalidConfig {
        reason: reason.to_string(),
    }
}

fn default_min_level() -> String {
    "error".to_string()
}

fn default_exception_property() -> String {
    DEFAULT_EXCEPTION_PROPERTY.to_string()
}

/// Blank means no static tags; otherwise pieces pass through untrimmed
fn split_tags(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split(',').map(str::to_string).collect()
}

/// Blank yields a single empty entry, matching what backend clients expect
fn split_values(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return vec![String::new()];
    }
    input.split(',').map(str::to_string).collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    api_key: Sensitive<String>,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    ignore_form_field_names: String,
    #[serde(default)]
    ignore_cookie_names: String,
    #[serde(default)]
    ignore_header_names: String,
    #[serde(default)]
    ignore_server_variable_names: String,
    #[serde(default)]
    ignore_message_starts_with: Vec<String>,
    #[serde(default)]
    ignore_message_contains: Vec<String>,
    #[serde(default)]
    global_context_data: Vec<String>,
    #[serde(default)]
    global_context_tags: Vec<String>,
    #[serde(default)]
    scoped_context_data: Vec<String>,
    #[serde(default)]
    scoped_context_tags: Vec<String>,
    #[serde(default = "default_exception_property")]
    exception_property: String,
    #[serde(default = "default_min_level")]
    min_level: String,
    #[serde(default)]
    delivery: DeliveryConfig,
}

impl RawConfig {
    fn into_builder(self) -> AdapterConfigBuilder {
        AdapterConfigBuilder::new(self.api_key.into_inner())
            .tags(self.tags)
            .ignore_form_field_names(self.ignore_form_field_names)
            .ignore_cookie_names(self.ignore_cookie_names)
            .ignore_header_names(self.ignore_header_names)
            .ignore_server_variable_names(self.ignore_server_variable_names)
            .ignore_message_starts_with(self.ignore_message_starts_with)
            .ignore_message_contains(self.ignore_message_contains)
            .global_context_data(self.global_context_data)
            .global_context_tags(self.global_context_tags)
            .scoped_context_data(self.scoped_context_data)
            .scoped_context_tags(self.scoped_context_tags)
            .exception_property(self.exception_property)
            .min_level(self.min_level)
            .delivery(self.delivery)
    }
}
