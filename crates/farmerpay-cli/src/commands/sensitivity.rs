use clap::Args;
use rust_decimal::Decimal;

use farmerpay_core::sensitivity::fee::{self, FeeOptimizationInput};
use farmerpay_core::sensitivity::npa::{self, NpaSensitivityInput};

use super::{load_input, CmdResult, LoanFlags};

/// Arguments for the NPA sensitivity sweep
#[derive(Args)]
pub struct NpaArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// Also report assisted profit at this FarmerPay fee
    #[arg(long)]
    pub fee: Option<Decimal>,
}

/// Arguments for the optimal FarmerPay fee search
#[derive(Args)]
pub struct FeeArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,
}

pub fn run_npa_sensitivity(args: NpaArgs) -> CmdResult {
    let npa_input: NpaSensitivityInput = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => NpaSensitivityInput {
            category: args.loan.category,
            loan: args.loan.loan(),
            farmerpay_fee: args.fee,
        },
    };

    let result = npa::analyze_npa_sensitivity(&npa_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fee_optimization(args: FeeArgs) -> CmdResult {
    let fee_input: FeeOptimizationInput = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FeeOptimizationInput {
            category: args.loan.category,
            loan: args.loan.loan(),
        },
    };

    let result = fee::analyze_fee_optimization(&fee_input)?;
    Ok(serde_json::to_value(result)?)
}
