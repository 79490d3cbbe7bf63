//! Per-farmer revenue resolution for the FarmerPay platform.
//!
//! Two tiered-pricing mechanisms exist side by side:
//! 1. **Simplified tiers** -- fixed multipliers of the base fee with a fixed
//!    60/30/10 population split.
//! 2. **Custom tiers** -- explicit basic/premium shares and three tier prices;
//!    the enterprise share is always the remainder.
//!
//! Additional revenue streams (insurance, marketplace, analytics, credit
//! scoring, weather advisory, training) add a flat per-farmer amount.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FarmerPayError;
use crate::limits::ensure_within;
use crate::types::{Money, Rate};
use crate::FarmerPayResult;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// One pricing tier as applied to the farmer population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    /// Share of farmers on this tier (0-1).
    pub share: Rate,
    /// Annual fee per farmer.
    pub fee: Money,
}

/// User-configured three-tier schedule.
///
/// Only the basic and premium shares are stored; the enterprise share is
/// derived so the three can never drift from summing to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierSchedule {
    pub basic_share: Rate,
    pub premium_share: Rate,
    pub basic_price: Money,
    pub premium_price: Money,
    pub enterprise_price: Money,
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self {
            basic_share: dec!(0.60),
            premium_share: dec!(0.30),
            basic_price: dec!(600),
            premium_price: dec!(1000),
            enterprise_price: dec!(1500),
        }
    }
}

impl TierSchedule {
    pub fn enterprise_share(&self) -> Rate {
        Decimal::ONE - self.basic_share - self.premium_share
    }

    pub fn tiers(&self) -> [PricingTier; 3] {
        [
            tier("Basic", self.basic_share, self.basic_price),
            tier("Premium", self.premium_share, self.premium_price),
            tier("Enterprise", self.enterprise_share(), self.enterprise_price),
        ]
    }

    /// Check the schedule against the configurable slider ranges
    /// (basic 40-80%, premium 20-40%, prices per tier). Only the bounds are
    /// checked, not the 5% / 20 slider steps.
    pub fn validate(&self) -> FarmerPayResult<()> {
        ensure_within("pricing.basic_share", self.basic_share, dec!(0.40), dec!(0.80))?;
        ensure_within("pricing.premium_share", self.premium_share, dec!(0.20), dec!(0.40))?;
        if self.enterprise_share() < Decimal::ZERO {
            return Err(FarmerPayError::InvalidInput {
                field: "pricing.premium_share".into(),
                reason: format!(
                    "Basic ({}) and premium ({}) shares exceed 100% of farmers",
                    self.basic_share, self.premium_share
                ),
            });
        }
        ensure_within("pricing.basic_price", self.basic_price, dec!(400), dec!(800))?;
        ensure_within("pricing.premium_price", self.premium_price, dec!(800), dec!(1400))?;
        ensure_within(
            "pricing.enterprise_price",
            self.enterprise_price,
            dec!(1200),
            dec!(2000),
        )
    }
}

fn tier(name: &str, share: Rate, fee: Money) -> PricingTier {
    PricingTier {
        name: name.to_string(),
        share,
        fee,
    }
}

/// (name, fee multiplier on the base fee, population share)
const SIMPLIFIED_TIERS: [(&str, Decimal, Decimal); 3] = [
    ("Basic", dec!(0.75), dec!(0.60)),
    ("Premium", dec!(1.25), dec!(0.30)),
    ("Enterprise", dec!(1.875), dec!(0.10)),
];

/// How the core subscription fee is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PricingStrategy {
    /// Every farmer pays the base fee.
    #[default]
    Flat,
    /// Fixed multipliers of the base fee on a 60/30/10 split.
    SimplifiedTiers,
    /// Explicit tier shares and prices.
    CustomTiers(TierSchedule),
}

impl PricingStrategy {
    pub fn is_tiered(&self) -> bool {
        !matches!(self, PricingStrategy::Flat)
    }

    /// Tier table for `base_fee`; empty for flat pricing.
    pub fn tiers(&self, base_fee: Money) -> Vec<PricingTier> {
        match self {
            PricingStrategy::Flat => Vec::new(),
            PricingStrategy::SimplifiedTiers => SIMPLIFIED_TIERS
                .iter()
                .map(|(name, multiplier, share)| tier(name, *share, base_fee * *multiplier))
                .collect(),
            PricingStrategy::CustomTiers(schedule) => schedule.tiers().to_vec(),
        }
    }
}

/// Population-weighted average fee across `tiers`.
pub fn weighted_fee(tiers: &[PricingTier]) -> Money {
    tiers.iter().map(|t| t.share * t.fee).sum()
}

/// Core (subscription) fee per farmer under `strategy`.
pub fn core_fee(base_fee: Money, strategy: &PricingStrategy) -> Money {
    match strategy {
        PricingStrategy::Flat => base_fee,
        tiered => weighted_fee(&tiered.tiers(base_fee)),
    }
}

// ---------------------------------------------------------------------------
// Additional revenue streams
// ---------------------------------------------------------------------------

/// Documented slider range of one revenue stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreamRange {
    pub name: &'static str,
    pub min: Money,
    pub max: Money,
    /// Input granularity for front ends. Validation checks only `min..=max`;
    /// the defaults themselves sit off this grid.
    pub step: Money,
    pub default: Money,
}

pub const STREAM_RANGES: [StreamRange; 6] = [
    stream("insurance_commission", dec!(100), dec!(200), dec!(150)),
    stream("marketplace_commission", dec!(150), dec!(250), dec!(200)),
    stream("data_analytics", dec!(80), dec!(120), dec!(100)),
    stream("credit_scoring", dec!(60), dec!(100), dec!(80)),
    stream("weather_advisory", dec!(30), dec!(70), dec!(50)),
    stream("training_programs", dec!(100), dec!(140), dec!(120)),
];

const fn stream(name: &'static str, min: Decimal, max: Decimal, default: Decimal) -> StreamRange {
    StreamRange {
        name,
        min,
        max,
        step: dec!(20),
        default,
    }
}

/// Per-farmer annual fees from value-added services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueStreams {
    pub insurance_commission: Money,
    pub marketplace_commission: Money,
    pub data_analytics: Money,
    pub credit_scoring: Money,
    pub weather_advisory: Money,
    pub training_programs: Money,
}

impl Default for RevenueStreams {
    fn default() -> Self {
        let [insurance, marketplace, analytics, scoring, weather, training] =
            STREAM_RANGES.map(|r| r.default);
        Self {
            insurance_commission: insurance,
            marketplace_commission: marketplace,
            data_analytics: analytics,
            credit_scoring: scoring,
            weather_advisory: weather,
            training_programs: training,
        }
    }
}

impl RevenueStreams {
    /// Stream values in [`STREAM_RANGES`] order.
    pub fn values(&self) -> [Money; 6] {
        [
            self.insurance_commission,
            self.marketplace_commission,
            self.data_analytics,
            self.credit_scoring,
            self.weather_advisory,
            self.training_programs,
        ]
    }

    pub fn total(&self) -> Money {
        self.values().iter().copied().sum()
    }

    pub fn validate(&self) -> FarmerPayResult<()> {
        for (range, value) in STREAM_RANGES.iter().zip(self.values()) {
            ensure_within(
                &format!("revenue_streams.{}", range.name),
                value,
                range.min,
                range.max,
            )?;
        }
        Ok(())
    }
}

/// Resolved per-farmer revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerRevenue {
    pub core_fee: Money,
    pub additional_revenue: Money,
    pub total: Money,
}

/// Per-farmer revenue: core fee plus, when enabled, the stream total.
pub fn resolve_revenue_per_farmer(
    base_fee: Money,
    strategy: &PricingStrategy,
    additional_streams: Option<&RevenueStreams>,
) -> FarmerRevenue {
    let core_fee = core_fee(base_fee, strategy);
    let additional_revenue = additional_streams.map_or(Decimal::ZERO, RevenueStreams::total);
    FarmerRevenue {
        core_fee,
        additional_revenue,
        total: core_fee + additional_revenue,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stream_validation_ignores_step_grid() {
        // 150 is the default yet lies off the 100 + 20k grid.
        let streams = RevenueStreams {
            insurance_commission: dec!(151),
            ..RevenueStreams::default()
        };
        assert!(streams.validate().is_ok());
        let streams = RevenueStreams {
            insurance_commission: dec!(201),
            ..RevenueStreams::default()
        };
        assert!(streams.validate().is_err());
    }

    #[test]
    fn test_flat_pricing_is_base_fee() {
        assert_eq!(core_fee(dec!(800), &PricingStrategy::Flat), dec!(800));
        assert!(PricingStrategy::Flat.tiers(dec!(800)).is_empty());
    }

    #[test]
    fn test_simplified_tiers() {
        // 0.6*600 + 0.3*1000 + 0.1*1500 = 810
        let fee = core_fee(dec!(800), &PricingStrategy::SimplifiedTiers);
        assert_eq!(fee, dec!(810));
        let tiers = PricingStrategy::SimplifiedTiers.tiers(dec!(800));
        assert_eq!(
            tiers.iter().map(|t| t.fee).collect::<Vec<_>>(),
            vec![dec!(600), dec!(1000), dec!(1500)]
        );
    }

    #[test]
    fn test_custom_tiers_default_weighted_fee() {
        let strategy = PricingStrategy::CustomTiers(TierSchedule::default());
        assert_eq!(core_fee(dec!(0), &strategy), dec!(810));
    }

    #[test]
    fn test_enterprise_share_is_remainder() {
        let schedule = TierSchedule {
            basic_share: dec!(0.45),
            premium_share: dec!(0.35),
            ..TierSchedule::default()
        };
        assert_eq!(schedule.enterprise_share(), dec!(0.20));
        let total: Decimal = schedule.tiers().iter().map(|t| t.share).sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_weighted_fee_within_tier_bounds() {
        let mut basic = dec!(0.40);
        while basic <= dec!(0.80) {
            let mut premium = dec!(0.20);
            while premium <= dec!(0.40) && basic + premium <= Decimal::ONE {
                let schedule = TierSchedule {
                    basic_share: basic,
                    premium_share: premium,
                    basic_price: dec!(740),
                    premium_price: dec!(820),
                    enterprise_price: dec!(1980),
                };
                let fee = weighted_fee(&schedule.tiers());
                assert!(fee >= dec!(740) && fee <= dec!(1980), "{basic}/{premium}: {fee}");
                premium += dec!(0.05);
            }
            basic += dec!(0.05);
        }
    }

    #[test]
    fn test_schedule_validation() {
        assert!(TierSchedule::default().validate().is_ok());

        let overfull = TierSchedule {
            basic_share: dec!(0.80),
            premium_share: dec!(0.40),
            ..TierSchedule::default()
        };
        assert!(overfull.validate().is_err());

        let cheap = TierSchedule {
            basic_price: dec!(100),
            ..TierSchedule::default()
        };
        assert!(cheap.validate().is_err());
    }

    #[test]
    fn test_default_streams_total() {
        // 150 + 200 + 100 + 80 + 50 + 120
        let streams = RevenueStreams::default();
        assert_eq!(streams.total(), dec!(700));
        assert!(streams.validate().is_ok());
    }

    #[test]
    fn test_stream_out_of_range() {
        let streams = RevenueStreams {
            weather_advisory: dec!(90),
            ..RevenueStreams::default()
        };
        let err = streams.validate().unwrap_err();
        assert!(err.to_string().contains("weather_advisory"));
    }

    #[test]
    fn test_revenue_with_and_without_streams() {
        let streams = RevenueStreams::default();
        let with = resolve_revenue_per_farmer(
            dec!(800),
            &PricingStrategy::SimplifiedTiers,
            Some(&streams),
        );
        assert_eq!(
            with,
            FarmerRevenue {
                core_fee: dec!(810),
                additional_revenue: dec!(700),
                total: dec!(1510),
            }
        );

        let without = resolve_revenue_per_farmer(dec!(800), &PricingStrategy::Flat, None);
        assert_eq!(without.total, dec!(800));
        assert_eq!(without.additional_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_strategy_serde_tagging() {
        let s: PricingStrategy = serde_json::from_value(serde_json::json!({
            "strategy": "custom_tiers",
            "basic_share": "0.5",
            "premium_share": "0.3"
        }))
        .unwrap();
        match s {
            PricingStrategy::CustomTiers(schedule) => {
                assert_eq!(schedule.enterprise_share(), dec!(0.2));
                assert_eq!(schedule.basic_price, dec!(600));
            }
            other => panic!("unexpected strategy {other:?}"),
        }
    }
}
