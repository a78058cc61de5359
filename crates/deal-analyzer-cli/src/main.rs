mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::deal::AnalyzeArgs;
use commands::scenarios::SensitivityArgs;

/// Rental property deal analysis
#[derive(Parser)]
#[command(
    name = "deal",
    version,
    about = "Rental property deal analysis",
    long_about = "Screen a prospective rental property acquisition with decimal precision: \
                  mortgage payment, PMI, operating expenses, NOI, cash flow, cap rate, \
                  cash-on-cash return and the 1% rule, plus sensitivity sweeps."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug events to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a deal (cash flow, NOI, cap rate, cash-on-cash, 1% rule)
    Analyze(AnalyzeArgs),
    /// Sweep one or two deal fields and recompute the deal at each point
    Sensitivity(SensitivityArgs),
    /// Print the seed deal inputs
    Defaults,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::deal::run_analyze(args),
        Commands::Sensitivity(args) => commands::scenarios::run_sensitivity(args),
        Commands::Defaults => commands::deal::run_defaults(),
        Commands::Version => {
            println!("deal {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
