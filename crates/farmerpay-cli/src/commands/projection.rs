use clap::Args;
use rust_decimal::Decimal;

use farmerpay_core::projection::growth::{
    self, GrowthProjectionInput, GrowthScenario, ProjectionAssumptions,
};
use farmerpay_core::sensitivity::scenario::{self, ScenarioComparisonInput};

use super::{default_investment, load_input, CmdResult, PlatformFlags};

/// Arguments for a multi-year growth projection
#[derive(Args)]
pub struct GrowthArgs {
    /// Path to JSON/YAML projection input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub platform: PlatformFlags,

    /// Annual farmer growth rate as a fraction (0.5 = 50%)
    #[arg(long, default_value = "0.5")]
    pub growth: Decimal,

    /// Annual churn rate as a fraction
    #[arg(long, default_value = "0.1")]
    pub churn: Decimal,

    /// Years to project after year 0
    #[arg(long, default_value_t = 5)]
    pub horizon: u32,

    /// Investment per year, comma separated (defaults to the up-front
    /// platform build-out in year 0)
    #[arg(long, value_delimiter = ',')]
    pub investment: Vec<Decimal>,
}

/// Arguments for the Conservative/Moderate/Aggressive comparison
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON/YAML comparison input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub platform: PlatformFlags,

    /// Years to project after year 0
    #[arg(long, default_value_t = 5)]
    pub horizon: u32,

    /// Investment per year, comma separated
    #[arg(long, value_delimiter = ',')]
    pub investment: Vec<Decimal>,
}

pub fn run_growth(args: GrowthArgs) -> CmdResult {
    let growth_input: GrowthProjectionInput = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => GrowthProjectionInput {
            investment_schedule: default_investment(args.investment, args.platform.farmers),
            platform: args.platform.config(),
            scenario: GrowthScenario {
                growth_rate: args.growth,
                churn_rate: args.churn,
                horizon_years: args.horizon,
            },
            assumptions: ProjectionAssumptions::default(),
        },
    };

    let result = growth::analyze_growth(&growth_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scenarios(args: ScenarioArgs) -> CmdResult {
    let comparison_input: ScenarioComparisonInput = match load_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ScenarioComparisonInput {
            investment_schedule: default_investment(args.investment, args.platform.farmers),
            platform: args.platform.config(),
            horizon_years: args.horizon,
            assumptions: ProjectionAssumptions::default(),
        },
    };

    let result = scenario::compare_scenarios(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}
