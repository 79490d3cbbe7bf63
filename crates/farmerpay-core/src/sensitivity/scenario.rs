//! Conservative / Moderate / Aggressive growth scenario comparison.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FarmerPayError;
use crate::limits::{ensure_non_negative, MAX_HORIZON_YEARS};
use crate::platform::analysis::{resolve_unit_economics, PlatformConfig};
use crate::projection::growth::{
    cumulative_net_profit, is_saturated, project_with, GrowthScenario, ProjectionAssumptions,
};
use crate::returns::safe_ratio;
use crate::types::*;
use crate::FarmerPayResult;

/// Named growth presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    Conservative,
    Moderate,
    Aggressive,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 3] = [
        ScenarioPreset::Conservative,
        ScenarioPreset::Moderate,
        ScenarioPreset::Aggressive,
    ];

    /// Deviations are measured against this preset.
    pub const BASE: ScenarioPreset = ScenarioPreset::Moderate;

    /// (growth rate, churn rate)
    pub fn rates(self) -> (Rate, Rate) {
        match self {
            ScenarioPreset::Conservative => (dec!(0.25), dec!(0.15)),
            ScenarioPreset::Moderate => (dec!(0.50), dec!(0.10)),
            ScenarioPreset::Aggressive => (dec!(1.00), dec!(0.05)),
        }
    }

    pub fn scenario(self, horizon_years: u32) -> GrowthScenario {
        let (growth_rate, churn_rate) = self.rates();
        GrowthScenario {
            growth_rate,
            churn_rate,
            horizon_years,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScenarioPreset::Conservative => "Conservative",
            ScenarioPreset::Moderate => "Moderate",
            ScenarioPreset::Aggressive => "Aggressive",
        }
    }
}

fn default_horizon() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparisonInput {
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
    #[serde(default)]
    pub investment_schedule: Vec<Money>,
    #[serde(default)]
    pub assumptions: ProjectionAssumptions,
}

/// Final-year outcome of one preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub preset: ScenarioPreset,
    pub growth_rate: Rate,
    pub churn_rate: Rate,
    pub final_farmers: Headcount,
    pub final_revenue: Money,
    pub final_net_profit: Money,
    pub final_roi: Rate,
    pub cumulative_net_profit: Money,
    /// Cumulative net profit minus the Moderate preset's.
    pub deviation_from_base: Money,
    /// `deviation_from_base` over the Moderate cumulative net profit.
    pub deviation_pct: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparisonOutput {
    pub horizon_years: u32,
    pub rows: Vec<ScenarioRow>,
}

struct PresetOutcome {
    preset: ScenarioPreset,
    final_farmers: Headcount,
    final_revenue: Money,
    final_net_profit: Money,
    final_roi: Rate,
    cumulative_net_profit: Money,
    saturated: bool,
}

fn run_preset(input: &ScenarioComparisonInput, preset: ScenarioPreset) -> PresetOutcome {
    let baseline = resolve_unit_economics(&input.platform, input.platform.farmers);
    let points = project_with(
        input.platform.farmers,
        &baseline,
        &preset.scenario(input.horizon_years),
        &input.investment_schedule,
        &input.assumptions,
    );
    let last = points.last();
    PresetOutcome {
        preset,
        final_farmers: last.map_or(input.platform.farmers, |p| p.farmers),
        final_revenue: last.map_or(Decimal::ZERO, |p| p.financials.total_revenue),
        final_net_profit: last.map_or(Decimal::ZERO, |p| p.financials.net_profit),
        final_roi: last.map_or(Decimal::ZERO, |p| p.roi),
        cumulative_net_profit: cumulative_net_profit(&points),
        saturated: is_saturated(&points),
    }
}

pub fn compare_scenarios(
    input: &ScenarioComparisonInput,
) -> FarmerPayResult<ComputationOutput<ScenarioComparisonOutput>> {
    let start = Instant::now();
    input.platform.validate()?;
    input.assumptions.validate()?;
    if input.horizon_years > MAX_HORIZON_YEARS {
        return Err(FarmerPayError::InvalidInput {
            field: "horizon_years".into(),
            reason: format!(
                "{} is outside the valid range 0..={MAX_HORIZON_YEARS}",
                input.horizon_years
            ),
        });
    }
    for (year, amount) in input.investment_schedule.iter().enumerate() {
        ensure_non_negative(&format!("investment_schedule[{year}]"), *amount)?;
    }
    log::debug!(
        "scenario comparison: base={} horizon={}",
        input.platform.farmers,
        input.horizon_years
    );

    let mut warnings: Vec<String> = Vec::new();
    let outcomes: Vec<PresetOutcome> = ScenarioPreset::ALL
        .iter()
        .map(|&preset| run_preset(input, preset))
        .collect();

    let base_value = outcomes
        .iter()
        .find(|o| o.preset == ScenarioPreset::BASE)
        .map_or(Decimal::ZERO, |o| o.cumulative_net_profit);

    let mut rows = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        if outcome.saturated {
            warnings.push(format!(
                "Scenario '{}' exceeds the representable range; its totals are capped",
                outcome.preset.label()
            ));
        }
        let deviation = outcome.cumulative_net_profit.saturating_sub(base_value);
        let deviation_pct = if base_value.is_zero() {
            if !deviation.is_zero() {
                warnings.push(format!(
                    "Base case is zero; cannot compute deviation_pct for scenario '{}'",
                    outcome.preset.label()
                ));
            }
            Decimal::ZERO
        } else {
            safe_ratio(deviation, base_value)
        };
        let (growth_rate, churn_rate) = outcome.preset.rates();
        rows.push(ScenarioRow {
            preset: outcome.preset,
            growth_rate,
            churn_rate,
            final_farmers: outcome.final_farmers,
            final_revenue: outcome.final_revenue,
            final_net_profit: outcome.final_net_profit,
            final_roi: outcome.final_roi,
            cumulative_net_profit: outcome.cumulative_net_profit,
            deviation_from_base: deviation,
            deviation_pct,
        });
    }

    let output = ScenarioComparisonOutput {
        horizon_years: input.horizon_years,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Conservative/Moderate/Aggressive Growth Scenarios",
        &serde_json::json!({
            "base_preset": ScenarioPreset::BASE.label(),
            "base_case_value": base_value.to_string(),
            "horizon_years": input.horizon_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}
