use clap::Args;

use farmerpay_core::ecosystem::{self, EcosystemInput};

use super::{load_input, CmdResult, LoanFlags, PlatformFlags};

/// Arguments for the combined bank + platform value analysis
#[derive(Args)]
pub struct EcosystemArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    #[command(flatten)]
    pub platform: PlatformFlags,
}

pub fn run_ecosystem(args: EcosystemArgs) -> CmdResult {
    let eco_input: EcosystemInput = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EcosystemInput {
            category: args.loan.category,
            loan: args.loan.loan(),
            platform: args.platform.config(),
        },
    };

    let result = ecosystem::analyze_ecosystem(&eco_input)?;
    Ok(serde_json::to_value(result)?)
}
