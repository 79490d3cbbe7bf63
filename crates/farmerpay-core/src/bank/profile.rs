//! Bank operating profile resolution.
//!
//! Maps (bank category, NPA rate, FarmerPay-assisted) to a [`BankProfile`].
//! Collection efficiency and recovery rate degrade linearly as the
//! (effective) NPA rises above a category reference point and are clamped at
//! a category floor. Operating cost and non-interest revenue are flat per
//! category and assistance state.
//!
//! The six constant bundles live in one declarative table below.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lender category. Each carries its own baseline constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankCategory {
    /// Scheduled Commercial Banks (SCBs).
    #[serde(alias = "scb")]
    ScheduledCommercial,
    /// Regional Rural Banks (RRBs).
    #[serde(alias = "rrb")]
    RegionalRural,
    /// Cooperative banks.
    #[serde(alias = "coop")]
    Cooperative,
}

impl BankCategory {
    pub const ALL: [BankCategory; 3] = [
        BankCategory::ScheduledCommercial,
        BankCategory::RegionalRural,
        BankCategory::Cooperative,
    ];

    /// Typical portfolio NPA rate for the category, in points.
    pub fn default_npa_rate(self) -> Percent {
        match self {
            BankCategory::ScheduledCommercial => dec!(14.16),
            BankCategory::RegionalRural => dec!(7.1),
            BankCategory::Cooperative => dec!(6.5),
        }
    }

    /// Reduction in NPA (points) attributed to FarmerPay assistance.
    pub fn assisted_npa_reduction(self) -> Percent {
        match self {
            BankCategory::ScheduledCommercial => dec!(2.0),
            BankCategory::RegionalRural => dec!(1.5),
            BankCategory::Cooperative => dec!(1.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BankCategory::ScheduledCommercial => "Scheduled Commercial Banks (SCBs)",
            BankCategory::RegionalRural => "Regional Rural Banks (RRBs)",
            BankCategory::Cooperative => "Cooperative Banks",
        }
    }
}

/// Derived operating profile of a lender for a single KCC loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankProfile {
    /// Fraction of scheduled interest collected (0-1).
    pub collection_efficiency: Rate,
    /// Fraction of subvention-eligible principal recovered (0-1).
    pub recovery_rate: Rate,
    /// Operating cost per loan per year.
    pub operating_cost: Money,
    /// Non-interest revenue per loan per year.
    pub other_revenue: Money,
    /// Effective NPA rate in points, never negative.
    pub effective_npa: Percent,
}

// ---------------------------------------------------------------------------
// Constant table
// ---------------------------------------------------------------------------

/// A linearly degrading metric: `max(floor, baseline - (npa - reference) * slope)`.
#[derive(Debug, Clone, Copy)]
struct DegradingMetric {
    baseline: Decimal,
    floor: Decimal,
    slope: Decimal,
    cap: Option<Decimal>,
}

impl DegradingMetric {
    fn at(&self, effective_npa: Percent, reference_npa: Percent) -> Decimal {
        let value = (self.baseline - (effective_npa - reference_npa) * self.slope).max(self.floor);
        match self.cap {
            Some(cap) => value.min(cap),
            None => value,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CategoryConstants {
    reference_npa: Percent,
    collection: DegradingMetric,
    recovery: DegradingMetric,
    operating_cost: Money,
    other_revenue: Money,
}

const UNASSISTED_COLLECTION_SLOPE: Decimal = dec!(2.0);
const ASSISTED_COLLECTION_SLOPE: Decimal = dec!(1.5);
const UNASSISTED_RECOVERY_SLOPE: Decimal = dec!(1.5);
const ASSISTED_RECOVERY_SLOPE: Decimal = dec!(1.2);
/// Collection efficiency is a fraction of scheduled interest; it cannot
/// exceed 100% even far below the reference NPA.
const COLLECTION_CAP: Decimal = dec!(100);

const fn unassisted_bundle(
    reference_npa: Decimal,
    collection: (Decimal, Decimal),
    recovery: (Decimal, Decimal),
    operating_cost: Decimal,
    other_revenue: Decimal,
) -> CategoryConstants {
    CategoryConstants {
        reference_npa,
        collection: DegradingMetric {
            baseline: collection.0,
            floor: collection.1,
            slope: UNASSISTED_COLLECTION_SLOPE,
            cap: Some(COLLECTION_CAP),
        },
        recovery: DegradingMetric {
            baseline: recovery.0,
            floor: recovery.1,
            slope: UNASSISTED_RECOVERY_SLOPE,
            cap: None,
        },
        operating_cost,
        other_revenue,
    }
}

const fn assisted_bundle(
    reference_npa: Decimal,
    collection: (Decimal, Decimal),
    recovery: (Decimal, Decimal),
    recovery_cap: Option<Decimal>,
    operating_cost: Decimal,
    other_revenue: Decimal,
) -> CategoryConstants {
    CategoryConstants {
        reference_npa,
        collection: DegradingMetric {
            baseline: collection.0,
            floor: collection.1,
            slope: ASSISTED_COLLECTION_SLOPE,
            cap: Some(COLLECTION_CAP),
        },
        recovery: DegradingMetric {
            baseline: recovery.0,
            floor: recovery.1,
            slope: ASSISTED_RECOVERY_SLOPE,
            cap: recovery_cap,
        },
        operating_cost,
        other_revenue,
    }
}

// (reference NPA, (CE base, CE floor), (RR base, RR floor), op cost, other revenue)
const SCB_UNASSISTED: CategoryConstants =
    unassisted_bundle(dec!(14.16), (dec!(80), dec!(60)), (dec!(85), dec!(70)), dec!(1300), dec!(248));
const SCB_ASSISTED: CategoryConstants = assisted_bundle(
    dec!(12.16),
    (dec!(90), dec!(75)),
    (dec!(95), dec!(85)),
    None,
    dec!(1105),
    dec!(300),
);
const RRB_UNASSISTED: CategoryConstants =
    unassisted_bundle(dec!(7.1), (dec!(85), dec!(70)), (dec!(90), dec!(75)), dec!(1000), dec!(198));
const RRB_ASSISTED: CategoryConstants = assisted_bundle(
    dec!(5.6),
    (dec!(93), dec!(80)),
    (dec!(98), dec!(88)),
    None,
    dec!(900),
    dec!(250),
);
const COOP_UNASSISTED: CategoryConstants =
    unassisted_bundle(dec!(6.5), (dec!(87), dec!(72)), (dec!(88), dec!(73)), dec!(860), dec!(148));
const COOP_ASSISTED: CategoryConstants = assisted_bundle(
    dec!(5.5),
    (dec!(92), dec!(77)),
    (dec!(100), dec!(88)),
    Some(dec!(100)),
    dec!(688),
    dec!(200),
);

fn constants(category: BankCategory, assisted: bool) -> &'static CategoryConstants {
    match (category, assisted) {
        (BankCategory::ScheduledCommercial, false) => &SCB_UNASSISTED,
        (BankCategory::ScheduledCommercial, true) => &SCB_ASSISTED,
        (BankCategory::RegionalRural, false) => &RRB_UNASSISTED,
        (BankCategory::RegionalRural, true) => &RRB_ASSISTED,
        (BankCategory::Cooperative, false) => &COOP_UNASSISTED,
        (BankCategory::Cooperative, true) => &COOP_ASSISTED,
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Resolve the operating profile of `category` at `npa_rate` (points).
///
/// With `assisted`, the NPA is first reduced by the category's FarmerPay
/// reduction (floored at zero) and the assisted constant bundle is used.
pub fn resolve_bank_profile(category: BankCategory, npa_rate: Percent, assisted: bool) -> BankProfile {
    let c = constants(category, assisted);

    let effective_npa = if assisted {
        (npa_rate - category.assisted_npa_reduction()).max(Decimal::ZERO)
    } else {
        npa_rate
    };

    let collection_pct = c.collection.at(effective_npa, c.reference_npa);
    let recovery_pct = c.recovery.at(effective_npa, c.reference_npa);

    BankProfile {
        collection_efficiency: collection_pct / dec!(100),
        recovery_rate: recovery_pct / dec!(100),
        operating_cost: c.operating_cost,
        other_revenue: c.other_revenue,
        effective_npa,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
