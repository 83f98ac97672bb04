//! Replay command
//!
//! Usage: faultline replay --config <PATH> --events <PATH> [--global K=V]... [--scoped K=V]...
//!
//! Each line of the events file is one JSON log event. Reports are printed
//! to stdout as JSON lines; a summary goes to stderr.

use crate::commands::stdout::WriterTransport;
use clap::Args;
use faultline_client::{BackgroundClient, ClientSettings};
use faultline_core::config::AdapterConfig;
use faultline_core::context::{GlobalContext, ScopedContext};
use faultline_core::model::LogEvent;
use faultline_core::processor::EventProcessor;
use faultline_core::{host_version, ExError};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to the adapter configuration (TOML)
    #[arg(long)]
    pub config: PathBuf,

    /// Path to a JSON Lines file of log events
    #[arg(long)]
    pub events: PathBuf,

    /// Global diagnostic context entry (repeatable)
    #[arg(long = "global", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub global: Vec<(String, String)>,

    /// Scoped diagnostic context entry active for the whole replay (repeatable)
    #[arg(long = "scoped", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub scoped: Vec<(String, String)>,
}

/// Execute replay command
pub async fn execute(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(AdapterConfig::from_path(&args.config)?);
    let events = read_events(&args.events)?;

    let transport = Arc::new(WriterTransport::new(std::io::stdout()));
    let (client, worker) = BackgroundClient::spawn(ClientSettings::from(config.as_ref()), transport);

    let global: GlobalContext = args.global.into_iter().collect();
    let processor = EventProcessor::new(config, Arc::new(client), host_version!())
        .with_global_context(Arc::new(global));

    let mut submitted = 0;
    let mut suppressed = 0;
    let mut failed = 0;
    {
        let _scope = ScopedContext::push(args.scoped);
        for (line_no, event) in &events {
            match processor.process(event) {
                Ok(outcome) => {
                    submitted += outcome.submitted;
                    suppressed += outcome.suppressed;
                }
                Err(e) => {
                    failed += 1;
                    eprintln!("line {}: {}", line_no, ExError::from(e));
                }
            }
        }
    }
    drop(processor);

    let stats = worker.await?;
    eprintln!(
        "{} events: {} submitted, {} suppressed, {} failed; {} reports delivered, {} dropped",
        events.len(),
        submitted,
        suppressed,
        failed,
        stats.delivered,
        stats.failed
    );

    if failed > 0 {
        return Err(format!("{} events could not be processed", failed).into());
    }
    Ok(())
}

/// Parse non-blank lines as events, keeping 1-based line numbers
fn read_events(path: &Path) -> Result<Vec<(usize, LogEvent)>, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)
        .map_err(|e| format!("cannot open {}: {}", path.display(), e))?;

    let mut events = Vec::new();
    for (idx, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: LogEvent = serde_json::from_str(&line)
            .map_err(|e| format!("line {}: invalid event: {}", idx + 1, e))?;
        events.push((idx + 1, event));
    }
    Ok(events)
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
