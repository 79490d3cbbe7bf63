//! Guarded ratio helpers and the payback (break-even) policy.
//!
//! Every denominator that can legitimately be zero has a defined fallback
//! here, so calculators never surface an undefined value.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Months beyond which a payback is reported as [`BreakEven::BeyondHorizon`].
pub const BREAK_EVEN_HORIZON_MONTHS: Decimal = dec!(24);

/// `numerator / denominator`, or zero when the denominator is zero.
///
/// Quotients beyond the `Decimal` range clamp to `Decimal::MAX` or
/// `Decimal::MIN` by sign.
pub fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or({
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// `numerator / denominator * 100`, or zero when the denominator is not
/// strictly positive. Saturates like [`safe_ratio`].
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Percent {
    if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        safe_ratio(numerator, denominator).saturating_mul(dec!(100))
    }
}

/// How quickly a payback lands inside the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackBand {
    /// Under 6 months.
    Fast,
    /// 6 to under 12 months.
    Acceptable,
    /// 12 to 24 months inclusive.
    Long,
}

/// Payback of an annual fee out of the monthly value it creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEven {
    Within { months: Decimal, band: PaybackBand },
    BeyondHorizon { months: Decimal },
    NotAchievable,
}

impl BreakEven {
    pub fn months(&self) -> Option<Decimal> {
        match self {
            BreakEven::Within { months, .. } | BreakEven::BeyondHorizon { months } => {
                Some(*months)
            }
            BreakEven::NotAchievable => None,
        }
    }
}

/// Months needed for `annual_net_value` to repay `fee`.
///
/// `NotAchievable` whenever the net value is not strictly positive. A zero
/// fee pays back immediately.
pub fn break_even(fee: Money, annual_net_value: Money) -> BreakEven {
    if annual_net_value <= Decimal::ZERO {
        return BreakEven::NotAchievable;
    }
    // fee / (value / 12), arranged so a tiny value cannot round the divisor to zero.
    let months = safe_ratio(fee.max(Decimal::ZERO).saturating_mul(dec!(12)), annual_net_value);

    if months > BREAK_EVEN_HORIZON_MONTHS {
        BreakEven::BeyondHorizon { months }
    } else {
        let band = if months < dec!(6) {
            PaybackBand::Fast
        } else if months < dec!(12) {
            PaybackBand::Acceptable
        } else {
            PaybackBand::Long
        };
        BreakEven::Within { months, band }
    }
}
