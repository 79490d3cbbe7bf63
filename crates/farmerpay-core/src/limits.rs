//! Valid input ranges at the engine boundary.
//!
//! The calculators themselves never fail; the `analyze_*` entry points run
//! these checks first and reject out-of-range inputs with
//! [`FarmerPayError::InvalidInput`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FarmerPayError;
use crate::types::Headcount;
use crate::FarmerPayResult;

pub const MIN_NPA_RATE: Decimal = dec!(0);
pub const MAX_NPA_RATE: Decimal = dec!(30);

pub const MIN_LOAN_AMOUNT: Decimal = dec!(10_000);
pub const MAX_LOAN_AMOUNT: Decimal = dec!(10_000_000);

pub const MIN_INTEREST_RATE: Decimal = dec!(1);
pub const MAX_INTEREST_RATE: Decimal = dec!(15);

pub const MIN_FARMERS: Headcount = 1_000;
pub const MAX_FARMERS: Headcount = 10_000_000;

pub const MAX_HORIZON_YEARS: u32 = 50;

/// Base subscription fee spans the configurable tier prices.
pub const MIN_BASE_FEE: Decimal = dec!(400);
pub const MAX_BASE_FEE: Decimal = dec!(2000);

/// Upper bound on each per-farmer unit cost.
pub const MAX_UNIT_COST: Decimal = dec!(10_000);

/// Annual escalation of revenue per farmer, as a fraction.
pub const MAX_REVENUE_GROWTH: Decimal = dec!(1);

/// FarmerPay fee charged to a bank per KCC loan.
pub const MAX_FARMERPAY_FEE: Decimal = dec!(10_000);

/// Loans in the bank portfolio view.
pub const MIN_PORTFOLIO_SIZE: Headcount = 1;
pub const MAX_PORTFOLIO_SIZE: Headcount = 10_000_000;

/// Reject `value` unless `min <= value <= max`.
pub fn ensure_within(field: &str, value: Decimal, min: Decimal, max: Decimal) -> FarmerPayResult<()> {
    if value < min || value > max {
        return Err(FarmerPayError::invalid(
            field,
            format!("{value} is outside the valid range {min}..={max}"),
        ));
    }
    Ok(())
}

/// Reject negative amounts.
pub fn ensure_non_negative(field: &str, value: Decimal) -> FarmerPayResult<()> {
    if value < Decimal::ZERO {
        return Err(FarmerPayError::invalid(field, format!("{value} cannot be negative")));
    }
    Ok(())
}

/// Reject a count outside `min..=max`.
pub fn ensure_count_within(
    field: &str,
    count: Headcount,
    min: Headcount,
    max: Headcount,
) -> FarmerPayResult<()> {
    if !(min..=max).contains(&count) {
        return Err(FarmerPayError::invalid(
            field,
            format!("{count} is outside the valid range {min}..={max}"),
        ));
    }
    Ok(())
}

pub fn ensure_farmer_count(field: &str, farmers: Headcount) -> FarmerPayResult<()> {
    ensure_count_within(field, farmers, MIN_FARMERS, MAX_FARMERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(ensure_within("npa_rate", dec!(0), MIN_NPA_RATE, MAX_NPA_RATE).is_ok());
        assert!(ensure_within("npa_rate", dec!(30), MIN_NPA_RATE, MAX_NPA_RATE).is_ok());
        assert!(ensure_within("npa_rate", dec!(30.1), MIN_NPA_RATE, MAX_NPA_RATE).is_err());
    }

    #[test]
    fn test_error_names_the_field() {
        let err = ensure_within("loan.principal", dec!(5), MIN_LOAN_AMOUNT, MAX_LOAN_AMOUNT)
            .unwrap_err();
        assert!(err.to_string().contains("loan.principal"));
    }

    #[test]
    fn test_farmer_count_limits() {
        assert!(ensure_farmer_count("farmers", 999).is_err());
        assert!(ensure_farmer_count("farmers", 1_000).is_ok());
        assert!(ensure_farmer_count("farmers", 10_000_000).is_ok());
        assert!(ensure_farmer_count("farmers", 10_000_001).is_err());
    }

    #[test]
    fn test_portfolio_size_limits() {
        let check = |n| ensure_count_within("portfolio_size", n, MIN_PORTFOLIO_SIZE, MAX_PORTFOLIO_SIZE);
        assert!(check(0).is_err());
        assert!(check(1).is_ok());
        assert!(check(MAX_PORTFOLIO_SIZE).is_ok());
        assert!(check(u64::MAX).is_err());
    }

    #[test]
    fn test_negative_rejected() {
        assert!(ensure_non_negative("fee", dec!(-1)).is_err());
        assert!(ensure_non_negative("fee", Decimal::ZERO).is_ok());
    }
}
