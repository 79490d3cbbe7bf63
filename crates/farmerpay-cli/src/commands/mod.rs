pub mod bank;
pub mod ecosystem;
pub mod platform;
pub mod projection;
pub mod sensitivity;

use clap::Args;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use farmerpay_core::bank::financials::LoanTerms;
use farmerpay_core::bank::profile::BankCategory;
use farmerpay_core::platform::analysis::PlatformConfig;
use farmerpay_core::platform::pricing::PricingStrategy;

use crate::input;

pub type CmdResult = Result<Value, Box<dyn std::error::Error>>;

/// Typed input from `--input` or piped stdin, if either was given.
pub fn load_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(input::file::read_input(path)?));
    }
    input::stdin::read_stdin()
}

/// Accepts `scb`, `rrb`, `coop` or the full snake_case category names.
pub fn parse_category(s: &str) -> Result<BankCategory, String> {
    serde_json::from_value(Value::String(s.to_lowercase()))
        .map_err(|_| format!("unknown bank category '{s}' (expected scb, rrb or coop)"))
}

/// Loan flags shared by the bank-side commands.
#[derive(Args, Debug, Clone)]
pub struct LoanFlags {
    /// Bank category: scb, rrb or coop
    #[arg(long, value_parser = parse_category, default_value = "scb")]
    pub category: BankCategory,

    /// Loan principal
    #[arg(long, default_value = "120000")]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long, default_value = "7")]
    pub interest_rate: Decimal,

    /// NPA rate in percent (defaults to the category's typical rate)
    #[arg(long)]
    pub npa_rate: Option<Decimal>,
}

impl LoanFlags {
    pub fn loan(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            interest_rate: self.interest_rate,
            npa_rate: self.npa_rate.unwrap_or_else(|| self.category.default_npa_rate()),
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingFlag {
    Flat,
    Tiered,
}

/// Platform flags shared by the platform-side commands.
#[derive(Args, Debug, Clone)]
pub struct PlatformFlags {
    /// Number of farmers on the platform
    #[arg(long, default_value_t = 10_000)]
    pub farmers: u64,

    /// Annual base subscription fee per farmer
    #[arg(long, default_value = "800")]
    pub base_fee: Decimal,

    /// Pricing strategy (custom tier schedules need --input)
    #[arg(long, value_enum, default_value_t = PricingFlag::Flat)]
    pub pricing: PricingFlag,

    /// Charge the value-added service fees on top of the core fee
    #[arg(long)]
    pub streams: bool,

    /// Apply the cost optimization program
    #[arg(long)]
    pub optimize_costs: bool,

    /// Use negotiated partnership rates
    #[arg(long)]
    pub optimize_partnerships: bool,

    /// Apply economies-of-scale discounts
    #[arg(long)]
    pub scale_benefits: bool,

    /// Shorthand for every optimization plus tiered pricing and streams
    #[arg(long)]
    pub optimized: bool,
}

impl PlatformFlags {
    pub fn config(&self) -> PlatformConfig {
        let pricing = if self.optimized || self.pricing == PricingFlag::Tiered {
            PricingStrategy::SimplifiedTiers
        } else {
            PricingStrategy::Flat
        };
        PlatformConfig {
            farmers: self.farmers,
            base_fee: self.base_fee,
            pricing,
            additional_revenue_streams: self.streams || self.optimized,
            cost_optimization: self.optimize_costs || self.optimized,
            partnership_optimization: self.optimize_partnerships || self.optimized,
            economies_of_scale: self.scale_benefits || self.optimized,
            ..PlatformConfig::default()
        }
    }
}

/// Up-front investment used when no schedule is given on the command line.
pub fn default_investment(schedule: Vec<Decimal>, farmers: u64) -> Vec<Decimal> {
    if schedule.is_empty() {
        vec![farmerpay_core::platform::financials::platform_investment(farmers)]
    } else {
        schedule
    }
}
