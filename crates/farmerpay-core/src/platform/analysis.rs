//! Platform configuration, unit-economics resolution and the single-scale
//! platform analysis.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::limits::{ensure_farmer_count, ensure_within, MAX_BASE_FEE, MIN_BASE_FEE};
use crate::platform::cost::{resolve_cost_per_farmer, CostAssumptions};
use crate::platform::financials::{calculate_platform_financials, platform_investment, PlatformFinancials};
use crate::platform::partnership::resolve_partnership_rate;
use crate::platform::pricing::{
    resolve_revenue_per_farmer, PricingStrategy, PricingTier, RevenueStreams, STREAM_RANGES,
};
use crate::returns::{percent_of, safe_ratio};
use crate::types::*;
use crate::FarmerPayResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything that determines per-farmer platform economics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub farmers: Headcount,
    /// Annual subscription fee before tiering.
    pub base_fee: Money,
    pub pricing: PricingStrategy,
    /// Whether value-added service fees are charged on top of the core fee.
    pub additional_revenue_streams: bool,
    pub revenue_streams: RevenueStreams,
    pub cost_optimization: bool,
    pub partnership_optimization: bool,
    pub economies_of_scale: bool,
    pub costs: CostAssumptions,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            farmers: 10_000,
            base_fee: dec!(800),
            pricing: PricingStrategy::Flat,
            additional_revenue_streams: false,
            revenue_streams: RevenueStreams::default(),
            cost_optimization: false,
            partnership_optimization: false,
            economies_of_scale: false,
            costs: CostAssumptions::default(),
        }
    }
}

impl PlatformConfig {
    pub fn validate(&self) -> FarmerPayResult<()> {
        ensure_farmer_count("farmers", self.farmers)?;
        ensure_within("base_fee", self.base_fee, MIN_BASE_FEE, MAX_BASE_FEE)?;
        if let PricingStrategy::CustomTiers(schedule) = &self.pricing {
            schedule.validate()?;
        }
        if self.additional_revenue_streams {
            self.revenue_streams.validate()?;
        }
        self.costs.validate()
    }

    fn active_streams(&self) -> Option<&RevenueStreams> {
        self.additional_revenue_streams.then_some(&self.revenue_streams)
    }
}

// ---------------------------------------------------------------------------
// Unit economics
// ---------------------------------------------------------------------------

/// Per-farmer revenue, cost and partnership rate at one scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomics {
    pub core_fee: Money,
    pub additional_revenue: Money,
    pub revenue_per_farmer: Money,
    pub service_cost: Money,
    pub technology_cost: Money,
    pub cost_per_farmer: Money,
    pub partnership_rate: Rate,
}

/// Resolve unit economics of `config` as if it served `farmers`.
///
/// Cost and partnership tiers depend on the farmer count; pricing does not.
pub fn resolve_unit_economics(config: &PlatformConfig, farmers: Headcount) -> UnitEconomics {
    let revenue = resolve_revenue_per_farmer(config.base_fee, &config.pricing, config.active_streams());
    let cost = resolve_cost_per_farmer(
        farmers,
        config.cost_optimization,
        config.economies_of_scale,
        &config.costs,
    );
    UnitEconomics {
        core_fee: revenue.core_fee,
        additional_revenue: revenue.additional_revenue,
        revenue_per_farmer: revenue.total,
        service_cost: cost.service_cost,
        technology_cost: cost.technology_cost,
        cost_per_farmer: cost.total,
        partnership_rate: resolve_partnership_rate(farmers, config.partnership_optimization),
    }
}

/// Platform P&L, investment and ROI of `config` at `farmers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalePoint {
    pub farmers: Headcount,
    pub unit_economics: UnitEconomics,
    pub financials: PlatformFinancials,
    pub investment: Money,
    /// Annual net profit over the up-front investment, in points.
    pub roi: Percent,
}

pub fn evaluate_at_scale(config: &PlatformConfig, farmers: Headcount) -> ScalePoint {
    let unit_economics = resolve_unit_economics(config, farmers);
    let financials = calculate_platform_financials(
        farmers,
        unit_economics.revenue_per_farmer,
        unit_economics.cost_per_farmer,
        unit_economics.partnership_rate,
    );
    let investment = platform_investment(farmers);
    ScalePoint {
        farmers,
        roi: percent_of(financials.net_profit, investment),
        unit_economics,
        financials,
        investment,
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub name: String,
    pub share: Rate,
    pub fee: Money,
    pub users: Decimal,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamBreakdown {
    pub name: String,
    pub per_farmer: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAnalysisOutput {
    pub farmers: Headcount,
    pub unit_economics: UnitEconomics,
    /// Empty under flat pricing.
    pub tiers: Vec<TierBreakdown>,
    /// Empty when additional streams are off.
    pub streams: Vec<StreamBreakdown>,
    pub financials: PlatformFinancials,
    pub investment: Money,
    pub roi: Percent,
    pub intermediary_payment_per_farmer: Money,
}

fn tier_breakdown(tiers: &[PricingTier], farmers: Headcount) -> Vec<TierBreakdown> {
    let count = Decimal::from(farmers);
    tiers
        .iter()
        .map(|t| {
            let users = t.share * count;
            TierBreakdown {
                name: t.name.clone(),
                share: t.share,
                fee: t.fee,
                users,
                revenue: users * t.fee,
            }
        })
        .collect()
}

fn stream_breakdown(streams: &RevenueStreams, farmers: Headcount) -> Vec<StreamBreakdown> {
    let count = Decimal::from(farmers);
    STREAM_RANGES
        .iter()
        .zip(streams.values())
        .map(|(range, per_farmer)| StreamBreakdown {
            name: range.name.to_string(),
            per_farmer,
            total: per_farmer * count,
        })
        .collect()
}

/// Full platform analysis at the configured farmer count.
pub fn analyze_platform(
    config: &PlatformConfig,
) -> FarmerPayResult<ComputationOutput<PlatformAnalysisOutput>> {
    let start = Instant::now();
    config.validate()?;
    log::debug!(
        "platform analysis: farmers={} base_fee={} pricing={:?}",
        config.farmers,
        config.base_fee,
        config.pricing
    );

    let mut warnings: Vec<String> = Vec::new();
    let point = evaluate_at_scale(config, config.farmers);

    if point.financials.gross_profit <= Decimal::ZERO {
        warnings.push(format!(
            "Revenue per farmer ({}) does not cover direct cost per farmer ({})",
            point.unit_economics.revenue_per_farmer, point.unit_economics.cost_per_farmer
        ));
    }
    if point.roi < Decimal::ZERO {
        warnings.push("Platform is loss-making at this scale".into());
    }

    let output = PlatformAnalysisOutput {
        farmers: config.farmers,
        tiers: tier_breakdown(&config.pricing.tiers(config.base_fee), config.farmers),
        streams: config
            .active_streams()
            .map(|s| stream_breakdown(s, config.farmers))
            .unwrap_or_default(),
        intermediary_payment_per_farmer: safe_ratio(
            point.financials.intermediary_payment,
            Decimal::from(config.farmers),
        ),
        unit_economics: point.unit_economics,
        financials: point.financials,
        investment: point.investment,
        roi: point.roi,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "FarmerPay Platform Unit Economics",
        config,
        warnings,
        elapsed,
        output,
    ))
}
