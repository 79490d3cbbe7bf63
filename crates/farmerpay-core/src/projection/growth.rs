//! Multi-year platform projection under farmer growth and churn.
//!
//! Farmer counts compound as `floor(prev * (1 + g) * (1 - c))`. Unit
//! economics move independently of the count: revenue per farmer escalates,
//! cost per farmer and the partnership rate decline (the latter down to a
//! floor). The whole series is recomputed from scratch on every call.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FarmerPayError;
use crate::limits::{ensure_non_negative, ensure_within, MAX_HORIZON_YEARS, MAX_REVENUE_GROWTH};
use crate::platform::analysis::{resolve_unit_economics, PlatformConfig, UnitEconomics};
use crate::platform::financials::{calculate_platform_financials, PlatformFinancials};
use crate::returns::safe_ratio;
use crate::types::*;
use crate::FarmerPayResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Growth assumptions for one projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthScenario {
    /// Gross annual farmer acquisition (0.5 = +50%/yr). Must be positive.
    pub growth_rate: Rate,
    /// Annual share of farmers lost (0-1).
    pub churn_rate: Rate,
    /// Years projected after year 0.
    pub horizon_years: u32,
}

impl GrowthScenario {
    pub fn validate(&self) -> FarmerPayResult<()> {
        if self.growth_rate <= Decimal::ZERO {
            return Err(FarmerPayError::invalid(
                "scenario.growth_rate",
                format!("{} must be positive", self.growth_rate),
            ));
        }
        ensure_within("scenario.churn_rate", self.churn_rate, Decimal::ZERO, Decimal::ONE)?;
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(FarmerPayError::InvalidInput {
                field: "scenario.horizon_years".into(),
                reason: format!(
                    "{} is outside the valid range 0..={MAX_HORIZON_YEARS}",
                    self.horizon_years
                ),
            });
        }
        Ok(())
    }

    /// Combined per-year multiplier on the farmer count.
    pub fn net_growth_factor(&self) -> Decimal {
        (Decimal::ONE + self.growth_rate) * (Decimal::ONE - self.churn_rate)
    }
}

/// Year-over-year drift in unit economics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionAssumptions {
    /// Annual escalation of revenue per farmer.
    pub revenue_growth: Rate,
    /// Annual decline of cost per farmer.
    pub cost_decline: Rate,
    /// Annual decline of the partnership rate.
    pub partnership_decline: Rate,
    /// Partnership rate never drops below this.
    pub partnership_floor: Rate,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            revenue_growth: dec!(0.05),
            cost_decline: dec!(0.02),
            partnership_decline: dec!(0.05),
            partnership_floor: dec!(0.15),
        }
    }
}

impl ProjectionAssumptions {
    pub fn validate(&self) -> FarmerPayResult<()> {
        ensure_within(
            "assumptions.revenue_growth",
            self.revenue_growth,
            Decimal::ZERO,
            MAX_REVENUE_GROWTH,
        )?;
        ensure_within("assumptions.cost_decline", self.cost_decline, Decimal::ZERO, Decimal::ONE)?;
        ensure_within(
            "assumptions.partnership_decline",
            self.partnership_decline,
            Decimal::ZERO,
            Decimal::ONE,
        )?;
        ensure_within(
            "assumptions.partnership_floor",
            self.partnership_floor,
            Decimal::ZERO,
            Decimal::ONE,
        )
    }
}

/// One year of the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub farmers: Headcount,
    pub revenue_per_farmer: Money,
    pub cost_per_farmer: Money,
    pub partnership_rate: Rate,
    pub financials: PlatformFinancials,
    /// Investment made in this year (zero past the end of the schedule).
    pub investment: Money,
    pub cumulative_investment: Money,
    /// Net profit over cumulative investment; zero without investment.
    pub roi: Rate,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Next year's farmer count. Saturates instead of overflowing.
fn next_farmer_count(previous: Headcount, factor: Decimal) -> Headcount {
    Decimal::from(previous)
        .checked_mul(factor)
        .map(|v| v.floor())
        .and_then(|v| v.max(Decimal::ZERO).to_u64())
        .unwrap_or(Headcount::MAX)
}

/// Project with the default [`ProjectionAssumptions`].
pub fn project(
    base_farmers: Headcount,
    baseline: &UnitEconomics,
    scenario: &GrowthScenario,
    investment_schedule: &[Money],
) -> Vec<ProjectionPoint> {
    project_with(
        base_farmers,
        baseline,
        scenario,
        investment_schedule,
        &ProjectionAssumptions::default(),
    )
}

/// Project `horizon_years + 1` points starting from `baseline` at year 0.
///
/// Farmer counts saturate at `Headcount::MAX` and money at `Decimal::MAX`,
/// so unbounded growth flattens out instead of overflowing.
pub fn project_with(
    base_farmers: Headcount,
    baseline: &UnitEconomics,
    scenario: &GrowthScenario,
    investment_schedule: &[Money],
    assumptions: &ProjectionAssumptions,
) -> Vec<ProjectionPoint> {
    let growth_factor = scenario.net_growth_factor();
    let revenue_factor = Decimal::ONE + assumptions.revenue_growth;
    let cost_factor = Decimal::ONE - assumptions.cost_decline;
    let partnership_factor = Decimal::ONE - assumptions.partnership_decline;

    let mut farmers = base_farmers;
    let mut revenue_per_farmer = baseline.revenue_per_farmer;
    let mut cost_per_farmer = baseline.cost_per_farmer;
    let mut partnership_rate = baseline.partnership_rate;
    let mut cumulative_investment = Decimal::ZERO;

    let mut points = Vec::with_capacity(scenario.horizon_years as usize + 1);
    for year in 0..=scenario.horizon_years {
        if year > 0 {
            farmers = next_farmer_count(farmers, growth_factor);
            revenue_per_farmer = revenue_per_farmer.saturating_mul(revenue_factor);
            cost_per_farmer *= cost_factor;
            partnership_rate = (partnership_rate * partnership_factor).max(assumptions.partnership_floor);
        }

        let investment = investment_schedule
            .get(year as usize)
            .copied()
            .unwrap_or(Decimal::ZERO);
        cumulative_investment = cumulative_investment.saturating_add(investment);

        let financials =
            calculate_platform_financials(farmers, revenue_per_farmer, cost_per_farmer, partnership_rate);
        let roi = if cumulative_investment > Decimal::ZERO {
            safe_ratio(financials.net_profit, cumulative_investment)
        } else {
            Decimal::ZERO
        };

        points.push(ProjectionPoint {
            year,
            farmers,
            revenue_per_farmer,
            cost_per_farmer,
            partnership_rate,
            financials,
            investment,
            cumulative_investment,
            roi,
        });
    }
    points
}

// ---------------------------------------------------------------------------
// Analysis entry point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthProjectionInput {
    /// Platform whose resolved unit economics seed year 0.
    #[serde(default)]
    pub platform: PlatformConfig,
    pub scenario: GrowthScenario,
    /// Investment per year, index-aligned with the projection year.
    #[serde(default)]
    pub investment_schedule: Vec<Money>,
    #[serde(default)]
    pub assumptions: ProjectionAssumptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthProjectionOutput {
    pub baseline: UnitEconomics,
    pub points: Vec<ProjectionPoint>,
    pub cumulative_net_profit: Money,
    pub total_investment: Money,
    pub final_roi: Rate,
    /// First year in which cumulative net profit exceeds cumulative investment.
    pub payback_year: Option<u32>,
}

/// Sum of net profit across `points`, saturating.
pub fn cumulative_net_profit(points: &[ProjectionPoint]) -> Money {
    points
        .iter()
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.financials.net_profit))
}

/// Whether any point hit the farmer-count or money ceiling.
pub fn is_saturated(points: &[ProjectionPoint]) -> bool {
    points
        .iter()
        .any(|p| p.farmers == Headcount::MAX || p.financials.total_revenue == Decimal::MAX)
}

/// First year whose running net profit is strictly above running investment.
pub fn payback_year(points: &[ProjectionPoint]) -> Option<u32> {
    let mut cumulative_profit = Decimal::ZERO;
    points.iter().find_map(|p| {
        cumulative_profit = cumulative_profit.saturating_add(p.financials.net_profit);
        (cumulative_profit - p.cumulative_investment > Decimal::ZERO).then_some(p.year)
    })
}

pub fn analyze_growth(
    input: &GrowthProjectionInput,
) -> FarmerPayResult<ComputationOutput<GrowthProjectionOutput>> {
    let start = Instant::now();
    input.platform.validate()?;
    input.scenario.validate()?;
    input.assumptions.validate()?;
    for (year, amount) in input.investment_schedule.iter().enumerate() {
        ensure_non_negative(&format!("investment_schedule[{year}]"), *amount)?;
    }
    log::debug!(
        "growth projection: base={} g={} c={} horizon={}",
        input.platform.farmers,
        input.scenario.growth_rate,
        input.scenario.churn_rate,
        input.scenario.horizon_years
    );

    let mut warnings: Vec<String> = Vec::new();

    let baseline = resolve_unit_economics(&input.platform, input.platform.farmers);
    let points = project_with(
        input.platform.farmers,
        &baseline,
        &input.scenario,
        &input.investment_schedule,
        &input.assumptions,
    );

    if input.investment_schedule.is_empty() {
        warnings.push("No investment schedule supplied; ROI is reported as zero".into());
    } else if input.investment_schedule.len() > points.len() {
        warnings.push(format!(
            "Investment schedule has {} entries but the projection covers {} years; extra entries are ignored",
            input.investment_schedule.len(),
            points.len()
        ));
    }
    if input.scenario.net_growth_factor() < Decimal::ONE {
        warnings.push("Churn outpaces growth; the farmer base shrinks every year".into());
    }

    if is_saturated(&points) {
        warnings.push(
            "Projection exceeds the representable range; farmer counts and totals are capped".into(),
        );
    }

    let cumulative_net_profit = cumulative_net_profit(&points);
    let (total_investment, final_roi) = points
        .last()
        .map_or((Decimal::ZERO, Decimal::ZERO), |p| (p.cumulative_investment, p.roi));

    let output = GrowthProjectionOutput {
        payback_year: payback_year(&points),
        baseline,
        points,
        cumulative_net_profit,
        total_investment,
        final_roi,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Platform Growth Projection (growth net of churn)",
        &serde_json::json!({
            "growth_rate": input.scenario.growth_rate.to_string(),
            "churn_rate": input.scenario.churn_rate.to_string(),
            "horizon_years": input.scenario.horizon_years,
            "assumptions": input.assumptions,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn baseline() -> UnitEconomics {
        UnitEconomics {
            core_fee: dec!(810),
            additional_revenue: dec!(700),
            revenue_per_farmer: dec!(1510),
            service_cost: dec!(300),
            technology_cost: dec!(80),
            cost_per_farmer: dec!(380),
            partnership_rate: dec!(0.25),
        }
    }

    fn scenario(growth: Decimal, churn: Decimal, horizon: u32) -> GrowthScenario {
        GrowthScenario {
            growth_rate: growth,
            churn_rate: churn,
            horizon_years: horizon,
        }
    }

    #[test]
    fn test_farmer_recurrence() {
        let points = project(10_000, &baseline(), &scenario(dec!(0.5), dec!(0.10), 3), &[]);
        let counts: Vec<Headcount> = points.iter().map(|p| p.farmers).collect();
        // 10000*1.35 = 13500, 13500*1.35 = 18225, floor(18225*1.35) = 24603
        assert_eq!(counts, vec![10_000, 13_500, 18_225, 24_603]);
    }

    #[test]
    fn test_length_is_horizon_plus_one() {
        assert_eq!(project(10_000, &baseline(), &scenario(dec!(0.2), dec!(0.1), 0), &[]).len(), 1);
        assert_eq!(project(10_000, &baseline(), &scenario(dec!(0.2), dec!(0.1), 7), &[]).len(), 8);
    }

    #[test]
    fn test_no_growth_no_churn_is_constant() {
        let points = project(12_345, &baseline(), &scenario(Decimal::ZERO, Decimal::ZERO, 10), &[]);
        assert!(points.iter().all(|p| p.farmers == 12_345));
    }

    #[test]
    fn test_full_churn_collapses() {
        let points = project(50_000, &baseline(), &scenario(dec!(0.8), Decimal::ONE, 4), &[]);
        assert_eq!(points[0].farmers, 50_000);
        assert!(points[1..].iter().all(|p| p.farmers == 0));
        assert!(points[1..]
            .iter()
            .all(|p| p.financials.intermediary_payment == Decimal::ZERO));
    }

    #[test]
    fn test_unit_economics_drift() {
        let points = project(10_000, &baseline(), &scenario(dec!(0.5), dec!(0.1), 2), &[]);
        assert_eq!(points[0].revenue_per_farmer, dec!(1510));
        assert_eq!(points[1].revenue_per_farmer, dec!(1585.5));
        assert_eq!(points[2].revenue_per_farmer, dec!(1664.775));
        assert_eq!(points[1].cost_per_farmer, dec!(372.4));
        assert_eq!(points[1].partnership_rate, dec!(0.2375));
    }

    #[test]
    fn test_partnership_rate_floor() {
        let points = project(10_000, &baseline(), &scenario(dec!(0.1), dec!(0.05), 30), &[]);
        let last = points.last().unwrap();
        assert_eq!(last.partnership_rate, dec!(0.15));
        assert!(points.iter().all(|p| p.partnership_rate >= dec!(0.15)));
    }

    #[test]
    fn test_cumulative_investment_and_roi() {
        let schedule = [dec!(50_000_000), dec!(20_000_000)];
        let points = project(10_000, &baseline(), &scenario(dec!(0.5), dec!(0.1), 3), &schedule);
        assert_eq!(points[0].cumulative_investment, dec!(50_000_000));
        assert_eq!(points[1].cumulative_investment, dec!(70_000_000));
        // Years past the schedule contribute nothing.
        assert_eq!(points[3].investment, Decimal::ZERO);
        assert_eq!(points[3].cumulative_investment, dec!(70_000_000));
        // Year 0: 8,475,000 / 50,000,000
        assert_eq!(points[0].roi, dec!(0.1695));
    }

    #[test]
    fn test_roi_zero_without_investment() {
        let points = project(10_000, &baseline(), &scenario(dec!(0.5), dec!(0.1), 2), &[]);
        assert!(points.iter().all(|p| p.roi == Decimal::ZERO));
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        assert_eq!(next_farmer_count(Headcount::MAX, dec!(2)), Headcount::MAX);
    }

    #[test]
    fn test_payback_year() {
        let schedule = [dec!(20_000_000)];
        let points = project(10_000, &baseline(), &scenario(dec!(0.5), dec!(0.1), 5), &schedule);
        // 8.475M in year 0, then growing: crosses 20M during year 1.
        assert_eq!(payback_year(&points), Some(1));
    }

    #[test]
    fn test_analyze_growth_end_to_end() {
        let input = GrowthProjectionInput {
            platform: PlatformConfig::default(),
            scenario: scenario(dec!(0.5), dec!(0.1), 3),
            investment_schedule: vec![dec!(50_000_000)],
            assumptions: ProjectionAssumptions::default(),
        };
        let out = analyze_growth(&input).unwrap();
        assert_eq!(out.result.points.len(), 4);
        assert_eq!(out.result.baseline.revenue_per_farmer, dec!(800));
        assert_eq!(out.result.total_investment, dec!(50_000_000));
        assert_eq!(
            out.result.cumulative_net_profit,
            out.result.points.iter().map(|p| p.financials.net_profit).sum::<Decimal>()
        );
    }

    #[test]
    fn test_analyze_growth_validation() {
        let mut input = GrowthProjectionInput {
            platform: PlatformConfig::default(),
            scenario: scenario(Decimal::ZERO, dec!(0.1), 3),
            investment_schedule: vec![],
            assumptions: ProjectionAssumptions::default(),
        };
        assert!(analyze_growth(&input).is_err());

        input.scenario = scenario(dec!(0.5), dec!(1.5), 3);
        assert!(analyze_growth(&input).is_err());

        input.scenario = scenario(dec!(0.5), dec!(0.1), 51);
        assert!(analyze_growth(&input).is_err());

        input.scenario = scenario(dec!(0.5), dec!(0.1), 3);
        input.investment_schedule = vec![dec!(-1)];
        assert!(analyze_growth(&input).is_err());
    }

    #[test]
    fn test_shrinking_base_warns() {
        let input = GrowthProjectionInput {
            platform: PlatformConfig::default(),
            scenario: scenario(dec!(0.1), dec!(0.5), 2),
            investment_schedule: vec![],
            assumptions: ProjectionAssumptions::default(),
        };
        let out = analyze_growth(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Churn outpaces growth")));
    }
}
