use farmerpay_core::platform::analysis::{resolve_unit_economics, PlatformConfig};
use farmerpay_core::platform::pricing::PricingStrategy;
use farmerpay_core::projection::growth::{
    analyze_growth, project, GrowthProjectionInput, GrowthScenario, ProjectionAssumptions,
};
use farmerpay_core::Headcount;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn optimized_platform() -> PlatformConfig {
    PlatformConfig {
        pricing: PricingStrategy::SimplifiedTiers,
        additional_revenue_streams: true,
        cost_optimization: true,
        partnership_optimization: true,
        ..PlatformConfig::default()
    }
}

fn scenario(growth_rate: Decimal, churn_rate: Decimal, horizon_years: u32) -> GrowthScenario {
    GrowthScenario {
        growth_rate,
        churn_rate,
        horizon_years,
    }
}

// ===========================================================================
// Farmer recurrence
// ===========================================================================

#[test]
fn test_moderate_recurrence_from_ten_thousand() {
    let platform = optimized_platform();
    let baseline = resolve_unit_economics(&platform, platform.farmers);
    let points = project(10_000, &baseline, &scenario(dec!(0.5), dec!(0.10), 3), &[]);
    let farmers: Vec<Headcount> = points.iter().map(|p| p.farmers).collect();
    assert_eq!(farmers, vec![10_000, 13_500, 18_225, 24_603]);
}

#[test]
fn test_growth_and_churn_compound_not_add() {
    let platform = optimized_platform();
    let baseline = resolve_unit_economics(&platform, platform.farmers);
    // Additive would give 10,000 * 1.4 = 14,000.
    let points = project(10_000, &baseline, &scenario(dec!(0.5), dec!(0.10), 1), &[]);
    assert_eq!(points[1].farmers, 13_500);
}

#[test]
fn test_static_and_collapsing_bases() {
    let platform = optimized_platform();
    let baseline = resolve_unit_economics(&platform, platform.farmers);

    let flat = project(7_777, &baseline, &scenario(Decimal::ZERO, Decimal::ZERO, 12), &[]);
    assert!(flat.iter().all(|p| p.farmers == 7_777));

    let gone = project(7_777, &baseline, &scenario(dec!(3), Decimal::ONE, 12), &[]);
    assert_eq!(gone[0].farmers, 7_777);
    assert!(gone.iter().skip(1).all(|p| p.farmers == 0));
    assert!(gone
        .iter()
        .skip(1)
        .all(|p| p.financials.intermediary_payment == Decimal::ZERO));
}

// ===========================================================================
// Analysis entry point
// ===========================================================================

#[test]
fn test_analyze_growth_with_upfront_investment() {
    let input = GrowthProjectionInput {
        platform: optimized_platform(),
        scenario: scenario(dec!(0.5), dec!(0.10), 5),
        investment_schedule: vec![dec!(50_000_000), dec!(10_000_000)],
        assumptions: ProjectionAssumptions::default(),
    };
    let out = analyze_growth(&input).unwrap();
    let r = &out.result;

    assert_eq!(r.points.len(), 6);
    assert_eq!(r.total_investment, dec!(60_000_000));
    assert_eq!(r.points[0].financials.net_profit, dec!(8_475_000));
    assert_eq!(r.points[0].roi, dec!(0.1695));
    let last = r.points.last().unwrap();
    assert_eq!(r.final_roi, last.financials.net_profit / dec!(60_000_000));

    // The payback year is the first one whose running profit clears running investment.
    let year = r.payback_year.unwrap();
    let profit_to_year: Decimal = r
        .points
        .iter()
        .take(year as usize + 1)
        .map(|p| p.financials.net_profit)
        .sum();
    assert!(profit_to_year > r.points[year as usize].cumulative_investment);
}

#[test]
fn test_analyze_growth_custom_assumptions() {
    let input = GrowthProjectionInput {
        platform: optimized_platform(),
        scenario: scenario(dec!(0.2), dec!(0.05), 2),
        investment_schedule: vec![],
        assumptions: ProjectionAssumptions {
            revenue_growth: Decimal::ZERO,
            cost_decline: Decimal::ZERO,
            partnership_decline: Decimal::ZERO,
            partnership_floor: dec!(0.15),
        },
    };
    let out = analyze_growth(&input).unwrap();
    assert!(out
        .result
        .points
        .iter()
        .all(|p| p.revenue_per_farmer == dec!(1510) && p.cost_per_farmer == dec!(380)));
    assert!(out.warnings.iter().any(|w| w.contains("No investment schedule")));
}

#[test]
fn test_growth_input_from_json_defaults() {
    let input: GrowthProjectionInput = serde_json::from_str(
        r#"{ "scenario": { "growth_rate": "0.5", "churn_rate": "0.1", "horizon_years": 3 } }"#,
    )
    .unwrap();
    assert_eq!(input.platform, PlatformConfig::default());
    assert_eq!(input.assumptions, ProjectionAssumptions::default());
    assert!(input.investment_schedule.is_empty());
}

// ===========================================================================
// Extreme inputs
// ===========================================================================

#[test]
fn test_runaway_revenue_growth_rejected() {
    let input = GrowthProjectionInput {
        platform: optimized_platform(),
        scenario: scenario(dec!(0.5), dec!(0.10), 50),
        investment_schedule: vec![dec!(50_000_000)],
        assumptions: ProjectionAssumptions {
            revenue_growth: dec!(10),
            ..ProjectionAssumptions::default()
        },
    };
    let err = analyze_growth(&input).unwrap_err();
    assert_eq!(err.field(), Some("assumptions.revenue_growth"));
}

#[test]
fn test_explosive_growth_saturates_with_warning() {
    let input = GrowthProjectionInput {
        platform: PlatformConfig {
            farmers: 10_000_000,
            base_fee: dec!(2000),
            ..optimized_platform()
        },
        scenario: scenario(dec!(100), Decimal::ZERO, 50),
        investment_schedule: vec![dec!(200_000_000)],
        assumptions: ProjectionAssumptions {
            revenue_growth: Decimal::ONE,
            ..ProjectionAssumptions::default()
        },
    };
    let out = analyze_growth(&input).unwrap();
    let last = out.result.points.last().unwrap();
    assert_eq!(last.farmers, Headcount::MAX);
    assert_eq!(last.financials.total_revenue, Decimal::MAX);
    assert!(out.result.cumulative_net_profit > Decimal::ZERO);
    assert!(out.warnings.iter().any(|w| w.contains("capped")));
}
