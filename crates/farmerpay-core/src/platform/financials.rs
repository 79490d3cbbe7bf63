//! Aggregate annual platform financials at a given farmer count.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::returns::percent_of;
use crate::types::{Headcount, Money, Percent, Rate};

/// Annual platform P&L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFinancials {
    pub total_revenue: Money,
    pub total_direct_cost: Money,
    pub gross_profit: Money,
    /// Paid only out of a positive gross profit.
    pub intermediary_payment: Money,
    pub net_profit: Money,
    /// Net profit over total revenue, in points; zero without revenue.
    pub profit_margin: Percent,
    pub revenue_per_farmer: Money,
    pub cost_per_farmer: Money,
}

/// Totals saturate at the `Decimal` bounds rather than overflow.
pub fn calculate_platform_financials(
    farmers: Headcount,
    revenue_per_farmer: Money,
    cost_per_farmer: Money,
    partnership_rate: Rate,
) -> PlatformFinancials {
    let count = Decimal::from(farmers);
    let total_revenue = count.saturating_mul(revenue_per_farmer);
    let total_direct_cost = count.saturating_mul(cost_per_farmer);
    let gross_profit = total_revenue.saturating_sub(total_direct_cost);

    let intermediary_payment = if gross_profit > Decimal::ZERO {
        gross_profit.saturating_mul(partnership_rate)
    } else {
        Decimal::ZERO
    };
    let net_profit = gross_profit.saturating_sub(intermediary_payment);

    PlatformFinancials {
        total_revenue,
        total_direct_cost,
        gross_profit,
        intermediary_payment,
        net_profit,
        profit_margin: percent_of(net_profit, total_revenue),
        revenue_per_farmer,
        cost_per_farmer,
    }
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

/// Up-front platform build-out by scale: (max farmers, investment).
const INVESTMENT_TIERS: [(Headcount, Money); 2] = [
    (10_000, dec!(50_000_000)),
    (100_000, dec!(100_000_000)),
];

const LARGE_SCALE_INVESTMENT: Money = dec!(200_000_000);

/// Capital needed to serve `farmers` (5 Cr, 10 Cr or 20 Cr).
pub fn platform_investment(farmers: Headcount) -> Money {
    INVESTMENT_TIERS
        .iter()
        .find(|(max_farmers, _)| farmers <= *max_farmers)
        .map_or(LARGE_SCALE_INVESTMENT, |(_, amount)| *amount)
}
