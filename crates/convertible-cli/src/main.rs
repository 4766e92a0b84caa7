//! Convertible CLI
//!
//! Applies a binding file to call arguments given as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Convertible - per-parameter argument conversion
#[derive(Parser)]
#[command(name = "convertible")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Binding file path
    #[arg(short, long, default_value = "binding.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert call arguments and print the result as JSON
    Call {
        /// Positional arguments as a JSON array
        #[arg(short, long, default_value = "[]")]
        args: String,

        /// Keyword arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        kwargs: String,
    },

    /// Show which converter applies to each parameter
    Plan,

    /// Validate the binding file without converting anything
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Call { args, kwargs } => {
            commands::call::run(&cli.config, &args, &kwargs)?;
        }
        Commands::Plan => {
            commands::plan::run(&cli.config)?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.config)?;
        }
    }

    Ok(())
}
