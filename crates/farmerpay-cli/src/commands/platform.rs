use clap::Args;

use farmerpay_core::platform::analysis::{self, PlatformConfig};
use farmerpay_core::sensitivity::scale::{self, ScalingInput};
use farmerpay_core::Headcount;

use super::{load_input, CmdResult, PlatformFlags};

/// Arguments for the platform unit-economics analysis
#[derive(Args)]
pub struct PlatformArgs {
    /// Path to JSON/YAML platform config (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub platform: PlatformFlags,
}

/// Arguments for the farmer-count scaling sweep
#[derive(Args)]
pub struct ScalingArgs {
    /// Path to JSON/YAML scaling input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub platform: PlatformFlags,

    /// Farmer counts to evaluate, comma separated
    #[arg(long, value_delimiter = ',')]
    pub scales: Vec<Headcount>,
}

pub fn run_platform(args: PlatformArgs) -> CmdResult {
    let config: PlatformConfig = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => args.platform.config(),
    };

    let result = analysis::analyze_platform(&config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scaling(args: ScalingArgs) -> CmdResult {
    let scaling_input: ScalingInput = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ScalingInput {
            platform: args.platform.config(),
            scales: (!args.scales.is_empty()).then_some(args.scales),
        },
    };

    let result = scale::analyze_scaling(&scaling_input)?;
    Ok(serde_json::to_value(result)?)
}
