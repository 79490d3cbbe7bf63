//! Per-loan revenue / cost / profit breakdown for a KCC loan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::bank::profile::BankProfile;
use crate::returns::percent_of;
use crate::types::{Money, Percent, Rate};

/// Interest subvention paid by government on the principal (1.5%).
pub const SUBVENTION_RATE: Rate = dec!(0.015);

/// Share of NPA-exposed principal held as provision (25%).
pub const PROVISIONING_COVERAGE: Rate = dec!(0.25);

/// Terms of a single representative KCC loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Loan principal.
    pub principal: Money,
    /// Annual interest rate in points (7.0 = 7%).
    pub interest_rate: Percent,
    /// Portfolio NPA rate in points (0-30).
    pub npa_rate: Percent,
}

/// Full annual revenue and cost breakdown for one loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankFinancials {
    pub interest_income: Money,
    pub govt_subvention: Money,
    pub other_revenue: Money,
    pub total_revenue: Money,
    pub operating_cost: Money,
    pub npa_provisioning: Money,
    pub platform_fee: Money,
    pub total_cost: Money,
    pub net_profit: Money,
    /// Collection efficiency in points, for display.
    pub collection_efficiency: Percent,
    /// Recovery rate in points, for display.
    pub recovery_rate: Percent,
    pub effective_npa: Percent,
}

impl BankFinancials {
    /// Net profit as a percentage of total revenue; zero without revenue.
    pub fn profit_margin(&self) -> Percent {
        percent_of(self.net_profit, self.total_revenue)
    }

    /// Net profit as a percentage of the loan principal.
    pub fn return_on_loan(&self, principal: Money) -> Percent {
        percent_of(self.net_profit, principal)
    }
}

/// Compute the revenue/cost/profit breakdown of `loan` under `profile`,
/// charging `platform_fee` per loan (zero for an unassisted bank).
pub fn calculate_bank_financials(
    loan: &LoanTerms,
    profile: &BankProfile,
    platform_fee: Money,
) -> BankFinancials {
    let interest_income = loan.interest_rate / dec!(100) * loan.principal * profile.collection_efficiency;
    let govt_subvention = SUBVENTION_RATE * loan.principal * profile.recovery_rate;
    let other_revenue = profile.other_revenue;
    let total_revenue = interest_income + govt_subvention + other_revenue;

    let operating_cost = profile.operating_cost;
    let npa_provisioning = profile.effective_npa / dec!(100) * PROVISIONING_COVERAGE * loan.principal;
    let total_cost = operating_cost + npa_provisioning + platform_fee;

    BankFinancials {
        interest_income,
        govt_subvention,
        other_revenue,
        total_revenue,
        operating_cost,
        npa_provisioning,
        platform_fee,
        total_cost,
        net_profit: total_revenue - total_cost,
        collection_efficiency: profile.collection_efficiency * dec!(100),
        recovery_rate: profile.recovery_rate * dec!(100),
        effective_npa: profile.effective_npa,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::profile::{resolve_bank_profile, BankCategory};

    fn reference_loan() -> LoanTerms {
        LoanTerms {
            principal: dec!(120_000),
            interest_rate: dec!(7),
            npa_rate: dec!(14.16),
        }
    }

    #[test]
    fn test_scb_unassisted_breakdown() {
        let loan = reference_loan();
        let profile = resolve_bank_profile(BankCategory::ScheduledCommercial, loan.npa_rate, false);
        let f = calculate_bank_financials(&loan, &profile, Decimal::ZERO);

        // 7% x 120,000 x 0.80
        assert_eq!(f.interest_income, dec!(6720));
        // 1.5% x 120,000 x 0.85
        assert_eq!(f.govt_subvention, dec!(1530));
        assert_eq!(f.other_revenue, dec!(248));
        assert_eq!(f.total_revenue, dec!(8498));
        // 14.16% x 25% x 120,000
        assert_eq!(f.npa_provisioning, dec!(4248));
        assert_eq!(f.total_cost, dec!(5548));
        assert_eq!(f.net_profit, dec!(2950));
        assert_eq!(f.collection_efficiency, dec!(80));
        assert_eq!(f.recovery_rate, dec!(85));
    }

    #[test]
    fn test_scb_assisted_breakdown_with_fee() {
        let loan = reference_loan();
        let profile = resolve_bank_profile(BankCategory::ScheduledCommercial, loan.npa_rate, true);
        let f = calculate_bank_financials(&loan, &profile, dec!(810));

        assert_eq!(f.interest_income, dec!(7560));
        assert_eq!(f.govt_subvention, dec!(1710));
        assert_eq!(f.total_revenue, dec!(9570));
        assert_eq!(f.npa_provisioning, dec!(3648));
        assert_eq!(f.platform_fee, dec!(810));
        assert_eq!(f.total_cost, dec!(5563));
        assert_eq!(f.net_profit, dec!(4007));
        assert_eq!(f.effective_npa, dec!(12.16));
    }

    #[test]
    fn test_totals_are_component_sums() {
        let loan = LoanTerms {
            principal: dec!(350_000),
            interest_rate: dec!(9.4),
            npa_rate: dec!(21.3),
        };
        for category in BankCategory::ALL {
            for assisted in [false, true] {
                let profile = resolve_bank_profile(category, loan.npa_rate, assisted);
                let f = calculate_bank_financials(&loan, &profile, dec!(455));
                assert_eq!(
                    f.total_revenue,
                    f.interest_income + f.govt_subvention + f.other_revenue
                );
                assert_eq!(f.total_cost, f.operating_cost + f.npa_provisioning + f.platform_fee);
                assert_eq!(f.net_profit, f.total_revenue - f.total_cost);
            }
        }
    }

    #[test]
    fn test_profit_margin_zero_revenue_guard() {
        let f = BankFinancials {
            interest_income: Decimal::ZERO,
            govt_subvention: Decimal::ZERO,
            other_revenue: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
            operating_cost: dec!(100),
            npa_provisioning: Decimal::ZERO,
            platform_fee: Decimal::ZERO,
            total_cost: dec!(100),
            net_profit: dec!(-100),
            collection_efficiency: Decimal::ZERO,
            recovery_rate: Decimal::ZERO,
            effective_npa: Decimal::ZERO,
        };
        assert_eq!(f.profit_margin(), Decimal::ZERO);
    }

    #[test]
    fn test_profit_margin_and_return_on_loan() {
        let loan = reference_loan();
        let profile = resolve_bank_profile(BankCategory::ScheduledCommercial, loan.npa_rate, false);
        let f = calculate_bank_financials(&loan, &profile, Decimal::ZERO);
        assert_eq!(f.profit_margin(), dec!(2950) / dec!(8498) * dec!(100));
        // 2950 / 120,000 = 2.458333...%
        assert!((f.return_on_loan(loan.principal) - dec!(2.4583)).abs() < dec!(0.0001));
    }
}
