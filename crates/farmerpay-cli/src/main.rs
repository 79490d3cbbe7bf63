mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::bank::BankArgs;
use commands::ecosystem::EcosystemArgs;
use commands::platform::{PlatformArgs, ScalingArgs};
use commands::projection::{GrowthArgs, ScenarioArgs};
use commands::sensitivity::{FeeArgs, NpaArgs};

/// KCC loan and FarmerPay platform profitability analysis
#[derive(Parser)]
#[command(
    name = "fpay",
    version,
    about = "KCC loan and FarmerPay platform profitability analysis",
    long_about = "A CLI for modelling how the FarmerPay platform changes the economics of \
                  Kisan Credit Card lending, for banks and for the platform itself, with \
                  decimal precision. Covers bank comparisons, platform unit economics, \
                  growth projections, and NPA/fee/scale sensitivity."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a bank's KCC loan economics with and without FarmerPay
    Bank(BankArgs),
    /// FarmerPay platform unit economics, investment and ROI
    Platform(PlatformArgs),
    /// Platform economics across farmer counts
    Scaling(ScalingArgs),
    /// Multi-year growth projection net of churn
    Growth(GrowthArgs),
    /// Compare Conservative, Moderate and Aggressive growth
    Scenarios(ScenarioArgs),
    /// Sweep bank profit across NPA rates
    NpaSensitivity(NpaArgs),
    /// Find the FarmerPay fee that adds the most value for a bank
    OptimalFee(FeeArgs),
    /// Combined value to partner banks and the platform
    Ecosystem(EcosystemArgs),
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

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    // RUST_LOG still wins when set.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Bank(args) => commands::bank::run_bank(args),
        Commands::Platform(args) => commands::platform::run_platform(args),
        Commands::Scaling(args) => commands::platform::run_scaling(args),
        Commands::Growth(args) => commands::projection::run_growth(args),
        Commands::Scenarios(args) => commands::projection::run_scenarios(args),
        Commands::NpaSensitivity(args) => commands::sensitivity::run_npa_sensitivity(args),
        Commands::OptimalFee(args) => commands::sensitivity::run_fee_optimization(args),
        Commands::Ecosystem(args) => commands::ecosystem::run_ecosystem(args),
        Commands::Version => {
            println!("fpay {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
