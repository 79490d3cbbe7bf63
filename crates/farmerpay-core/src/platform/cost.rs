//! Per-farmer direct cost of running the platform.
//!
//! Service and technology cost are discounted independently: first by the
//! cost-optimization program, then by at most one economies-of-scale tier
//! chosen by farmer count (highest threshold first, not cumulative).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::limits::{ensure_within, MAX_UNIT_COST};
use crate::types::{Headcount, Money, Rate};
use crate::FarmerPayResult;

/// Service-cost multiplier under cost optimization.
pub const OPTIMIZED_SERVICE_FACTOR: Rate = dec!(0.75);
/// Technology-cost multiplier under cost optimization.
pub const OPTIMIZED_TECHNOLOGY_FACTOR: Rate = dec!(0.80);

/// A volume discount on both cost components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleTier {
    pub min_farmers: Headcount,
    pub service_factor: Rate,
    pub technology_factor: Rate,
}

/// Highest threshold first.
pub const SCALE_TIERS: [ScaleTier; 3] = [
    ScaleTier {
        min_farmers: 100_000,
        service_factor: dec!(0.85),
        technology_factor: dec!(0.80),
    },
    ScaleTier {
        min_farmers: 50_000,
        service_factor: dec!(0.90),
        technology_factor: dec!(0.85),
    },
    ScaleTier {
        min_farmers: 25_000,
        service_factor: dec!(0.95),
        technology_factor: dec!(0.90),
    },
];

/// Undiscounted per-farmer unit costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    /// Field service cost per farmer per year.
    pub service_cost: Money,
    /// Technology opex per farmer per year.
    pub technology_cost: Money,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            service_cost: dec!(400),
            technology_cost: dec!(100),
        }
    }
}

impl CostAssumptions {
    pub fn validate(&self) -> FarmerPayResult<()> {
        ensure_within("costs.service_cost", self.service_cost, Decimal::ZERO, MAX_UNIT_COST)?;
        ensure_within(
            "costs.technology_cost",
            self.technology_cost,
            Decimal::ZERO,
            MAX_UNIT_COST,
        )
    }
}

/// Resolved per-farmer cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerCost {
    pub service_cost: Money,
    pub technology_cost: Money,
    pub total: Money,
}

/// The single scale tier matching `farmers`, if any.
pub fn scale_tier(farmers: Headcount) -> Option<&'static ScaleTier> {
    SCALE_TIERS.iter().find(|t| farmers >= t.min_farmers)
}

/// Per-farmer cost at `farmers` given the two cost toggles.
pub fn resolve_cost_per_farmer(
    farmers: Headcount,
    cost_optimization: bool,
    economies_of_scale: bool,
    assumptions: &CostAssumptions,
) -> FarmerCost {
    let mut service_cost = assumptions.service_cost;
    let mut technology_cost = assumptions.technology_cost;

    if cost_optimization {
        service_cost *= OPTIMIZED_SERVICE_FACTOR;
        technology_cost *= OPTIMIZED_TECHNOLOGY_FACTOR;
    }

    if economies_of_scale {
        if let Some(tier) = scale_tier(farmers) {
            service_cost *= tier.service_factor;
            technology_cost *= tier.technology_factor;
        }
    }

    FarmerCost {
        service_cost,
        technology_cost,
        total: service_cost + technology_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(farmers: Headcount, optimize: bool, scale: bool) -> FarmerCost {
        resolve_cost_per_farmer(farmers, optimize, scale, &CostAssumptions::default())
    }

    #[test]
    fn test_base_cost() {
        let c = resolve(10_000, false, false);
        assert_eq!(c.service_cost, dec!(400));
        assert_eq!(c.technology_cost, dec!(100));
        assert_eq!(c.total, dec!(500));
    }

    #[test]
    fn test_cost_optimization_only() {
        let c = resolve(10_000, true, false);
        assert_eq!(c.service_cost, dec!(300));
        assert_eq!(c.technology_cost, dec!(80));
        assert_eq!(c.total, dec!(380));
    }

    #[test]
    fn test_scale_tiers_are_exclusive() {
        // >= 100k: 400*0.85, 100*0.80 -- not compounded with the lower tiers
        let c = resolve(150_000, false, true);
        assert_eq!(c.service_cost, dec!(340));
        assert_eq!(c.technology_cost, dec!(80));

        let c = resolve(50_000, false, true);
        assert_eq!(c.service_cost, dec!(360));
        assert_eq!(c.technology_cost, dec!(85));

        let c = resolve(25_000, false, true);
        assert_eq!(c.service_cost, dec!(380));
        assert_eq!(c.technology_cost, dec!(90));

        let c = resolve(24_999, false, true);
        assert_eq!(c.total, dec!(500));
    }

    #[test]
    fn test_optimization_and_scale_compound() {
        // 400*0.75*0.85 = 255, 100*0.80*0.80 = 64
        let c = resolve(100_000, true, true);
        assert_eq!(c.service_cost, dec!(255));
        assert_eq!(c.technology_cost, dec!(64));
        assert_eq!(c.total, dec!(319));
    }

    #[test]
    fn test_scale_ignored_when_disabled() {
        assert_eq!(resolve(1_000_000, false, false).total, dec!(500));
    }

    #[test]
    fn test_scale_tier_lookup() {
        assert_eq!(scale_tier(99_999).map(|t| t.min_farmers), Some(50_000));
        assert!(scale_tier(1_000).is_none());
    }

    #[test]
    fn test_custom_assumptions() {
        let assumptions = CostAssumptions {
            service_cost: dec!(200),
            technology_cost: dec!(50),
        };
        let c = resolve_cost_per_farmer(10_000, true, false, &assumptions);
        assert_eq!(c.total, dec!(190));
        assert!(CostAssumptions {
            service_cost: dec!(-1),
            ..CostAssumptions::default()
        }
        .validate()
        .is_err());
        assert!(CostAssumptions {
            technology_cost: dec!(10_001),
            ..CostAssumptions::default()
        }
        .validate()
        .is_err());
    }
}
