//! Faultline CLI
//!
//! Command-line interface for checking adapter configuration and replaying
//! recorded log events through the reporting pipeline.

use clap::{Parser, Subcommand};
use faultline_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "faultline")]
#[command(about = "Faultline - log events to error reports", long_about = None)]
struct Cli {
    /// Human-readable debug diagnostics on stderr instead of JSON
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a configuration file and print a summary
    Validate(commands::validate::ValidateArgs),
    /// Run a JSON Lines file of log events through the pipeline
    Replay(commands::replay::ReplayArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Replay(args) => commands::replay::execute(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
