use faultline_core::config::{AdapterConfig, DeliveryConfig, IgnoreLists};
use faultline_core_types::Sensitive;

/// What the delivery client needs from the adapter configuration
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: Sensitive<String>,
    pub ignore: IgnoreLists,
    pub delivery: DeliveryConfig,
}

impl ClientSettings {
    /// Custom-data keys named in any ignore list
    ///
    /// Empty entries (from a blank list) never match.
    pub fn is_ignored(&self, key: &str) -> bool {
        let IgnoreLists {
            form_fields,
            cookies,
            headers,
            server_variables,
        } = &self.ignore;
        [form_fields, cookies, headers, server_variables]
            .into_iter()
            .flatten()
            .any(|name| !name.is_empty() && name.eq_ignore_ascii_case(key))
    }
}

impl From<&AdapterConfig> for ClientSettings {
    fn from(config: &AdapterConfig) -> Self {
        Self {
            api_key: config.api_key().clone(),
            ignore: config.ignore().clone(),
            delivery: config.delivery(),
        }
    }
}
