use clap::Args;
use rust_decimal::Decimal;

use farmerpay_core::bank::comparison::{self, BankAnalysisInput};

use super::{load_input, CmdResult, LoanFlags};

/// Arguments for a single-loan bank comparison
#[derive(Args)]
pub struct BankArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// Annual FarmerPay fee per loan; omit to analyse the current state only
    #[arg(long)]
    pub fee: Option<Decimal>,

    /// Number of KCC loans in the portfolio view
    #[arg(long, default_value_t = 1_000)]
    pub portfolio_size: u64,
}

pub fn run_bank(args: BankArgs) -> CmdResult {
    let bank_input: BankAnalysisInput = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => BankAnalysisInput {
            category: args.loan.category,
            loan: args.loan.loan(),
            farmerpay_fee: args.fee,
            portfolio_size: args.portfolio_size,
        },
    };

    let result = comparison::analyze_bank(&bank_input)?;
    Ok(serde_json::to_value(result)?)
}
