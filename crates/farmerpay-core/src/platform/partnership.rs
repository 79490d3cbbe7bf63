//! Share of gross profit paid to field intermediaries.

use rust_decimal_macros::dec;

use crate::types::{Headcount, Rate};

/// Partnership rate without optimization (30%).
pub const BASE_PARTNERSHIP_RATE: Rate = dec!(0.30);

/// Negotiated rate once partnerships are optimized, by minimum farmer count.
/// Highest threshold first; below every threshold the rate is 25%.
const OPTIMIZED_RATES: [(Headcount, Rate); 3] = [
    (100_000, dec!(0.18)),
    (50_000, dec!(0.20)),
    (25_000, dec!(0.22)),
];

const OPTIMIZED_FALLBACK_RATE: Rate = dec!(0.25);

/// Partnership rate for a platform serving `farmers`.
pub fn resolve_partnership_rate(farmers: Headcount, optimized: bool) -> Rate {
    if !optimized {
        return BASE_PARTNERSHIP_RATE;
    }
    OPTIMIZED_RATES
        .iter()
        .find(|(threshold, _)| farmers >= *threshold)
        .map_or(OPTIMIZED_FALLBACK_RATE, |(_, rate)| *rate)
}
