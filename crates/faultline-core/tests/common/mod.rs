use faultline_core::config::AdapterConfig;
use faultline_core::context::DiagnosticContext;
use faultline_core::processor::EventProcessor;
use faultline_core::sink::MemorySink;
use std::collections::HashMap;
use std::sync::Arc;

/// Host version handed to every test processor
#[allow(dead_code)]
pub const HOST_VERSION: &str = "4.0.0-test";

/// Build a processor over a fresh in-memory sink
#[allow(dead_code)]
pub fn processor_with(config: AdapterConfig) -> (EventProcessor, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let processor = EventProcessor::new(Arc::new(config), sink.clone(), HOST_VERSION);
    (processor, sink)
}

/// Fixed store from key/value pairs
#[allow(dead_code)]
pub fn store(pairs: &[(&str, &str)]) -> Arc<dyn DiagnosticContext> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Arc::new(map)
}

/// Split a comma-separated list into owned names
#[allow(dead_code)]
pub fn names(list: &str) -> Vec<String> {
    list.split(',').map(str::to_string).collect()
}
