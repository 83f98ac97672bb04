//! Validate command
//!
//! Usage: faultline validate --config <PATH>

use clap::Args;
use faultline_core::config::AdapterConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the adapter configuration (TOML)
    #[arg(long)]
    pub config: PathBuf,
}

/// Execute validate command
pub fn execute(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AdapterConfig::from_path(&args.config)?;
    print!("{}", summary(&config));
    Ok(())
}

fn summary(config: &AdapterConfig) -> String {
    let delivery = config.delivery();
    let mut out = String::new();
    out.push_str("✓ Configuration is valid\n");
    out.push_str(&format!("  api_key: {}\n", config.api_key()));
    out.push_str(&format!("  tags: {}\n", list(config.static_tags())));
    out.push_str(&format!("  min_level: {}\n", config.min_level()));
    out.push_str(&format!("  exception_property: {}\n", config.exception_property()));
    out.push_str(&format!(
        "  suppress: starts_with {}, contains {}\n",
        list(&config.suppression().starts_with),
        list(&config.suppression().contains)
    ));
    out.push_str(&format!(
        "  global context: data {}, tags {}\n",
        list(&config.global_context().data),
        list(&config.global_context().tags)
    ));
    out.push_str(&format!(
        "  scoped context: data {}, tags {}\n",
        list(&config.scoped_context().data),
        list(&config.scoped_context().tags)
    ));
    out.push_str(&format!(
        "  delivery: {} attempts, {}ms base delay\n",
        delivery.max_attempts, delivery.base_delay_ms
    ));
    out
}

fn list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_redacts_api_key() {
        let config = AdapterConfig::builder("very-secret")
            .tags("web,api")
            .build()
            .unwrap();
        let out = summary(&config);

        assert!(!out.contains("very-secret"));
        assert!(out.contains("tags: [web, api]"));
        assert!(out.contains("min_level: ERROR"));
    }
}
