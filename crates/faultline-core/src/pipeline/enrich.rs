use crate::config::AdapterConfig;
use crate::context::DiagnosticContext;
use crate::model::{CustomData, LogEvent};
use faultline_core_types::schema::CUSTOM_DATA_LOG_MESSAGE;

/// Build the custom data shared by every submission from one event
///
/// Seeded with the rendered message, then every property stringified, then
/// each configured context name present in its store (global before scoped).
/// Later writes replace earlier ones on key collision. Absent context names
/// are skipped.
pub fn enrich(
    event: &LogEvent,
    config: &AdapterConfig,
    global: &dyn DiagnosticContext,
    scoped: &dyn DiagnosticContext,
) -> CustomData {
    let mut data = CustomData::new();
    data.insert(CUSTOM_DATA_LOG_MESSAGE.to_string(), event.message().to_string());

    for (name, value) in event.properties() {
        data.insert(name.clone(), value.to_string());
    }

    merge_present(&mut data, &config.global_context().data, global);
    merge_present(&mut data, &config.scoped_context().data, scoped);
    data
}

fn merge_present(data: &mut CustomData, names: &[String], store: &dyn DiagnosticContext) {
    for name in names {
        if !store.contains(name) {
            continue;
        }
        if let Some(value) = store.get(name) {
            data.insert(name.clone(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyContext;
    use std::collections::HashMap;

    #[test]
    fn test_seed_and_properties() {
        let config = AdapterConfig::builder("k").build().unwrap();
        let event = LogEvent::new("disk full")
            .with_property("Volume", "/var")
            .with_property("FreeBytes", 0_i64);

        let data = enrich(&event, &config, &EmptyContext, &EmptyContext);
        assert_eq!(data.get(CUSTOM_DATA_LOG_MESSAGE), Some(&"disk full".to_string()));
        assert_eq!(data.get("Volume"), Some(&"/var".to_string()));
        assert_eq!(data.get("FreeBytes"), Some(&"0".to_string()));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_missing_context_names_are_skipped() {
        let config = AdapterConfig::builder("k")
            .scoped_context_data(vec!["RequestId".into(), "User".into()])
            .build()
            .unwrap();
        let mut scoped = HashMap::new();
        scoped.insert("User".to_string(), "alice".to_string());

        let data = enrich(&LogEvent::new("m"), &config, &EmptyContext, &scoped);
        assert_eq!(data.get("User"), Some(&"alice".to_string()));
        assert!(!data.contains_key("RequestId"));
    }

    #[test]
    fn test_context_written_after_seed_wins() {
        let config = AdapterConfig::builder("k")
            .global_context_data(vec![CUSTOM_DATA_LOG_MESSAGE.into()])
            .build()
            .unwrap();
        let mut global = HashMap::new();
        global.insert(CUSTOM_DATA_LOG_MESSAGE.to_string(), "from context".to_string());

        let data = enrich(&LogEvent::new("rendered"), &config, &global, &EmptyContext);
        assert_eq!(
            data.get(CUSTOM_DATA_LOG_MESSAGE),
            Some(&"from context".to_string())
        );
    }

    #[test]
    fn test_scoped_overrides_global_for_same_name() {
        let config = AdapterConfig::builder("k")
            .global_context_data(vec!["Slot".into()])
            .scoped_context_data(vec!["Slot".into()])
            .build()
            .unwrap();
        let global: HashMap<String, String> = [("Slot".to_string(), "blue".to_string())].into();
        let scoped: HashMap<String, String> = [("Slot".to_string(), "green".to_string())].into();

        let data = enrich(&LogEvent::new("m"), &config, &global, &scoped);
        assert_eq!(data.get("Slot"), Some(&"green".to_string()));
    }
}
