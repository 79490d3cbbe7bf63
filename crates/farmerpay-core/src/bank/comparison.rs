//! Current-state vs FarmerPay-assisted comparison for a lender.
//!
//! Covers:
//! 1. **Line-by-line deltas** between the unassisted and assisted breakdowns.
//! 2. **Value components** -- revenue increase, cost reduction, provisioning
//!    savings, the fee itself and the resulting net value addition.
//! 3. **Payback** of the fee (see [`crate::returns::break_even`]).
//! 4. **Portfolio and five-year impact** across a book of KCC loans.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bank::financials::{calculate_bank_financials, BankFinancials, LoanTerms};
use crate::bank::profile::{resolve_bank_profile, BankCategory};
use crate::limits::{self, ensure_count_within, ensure_within};
use crate::returns::{break_even, percent_of, safe_ratio, BreakEven};
use crate::types::*;
use crate::FarmerPayResult;

/// Years covered by the cumulative impact view.
pub const CUMULATIVE_YEARS: u32 = 5;

const HIGH_NPA_THRESHOLD: Percent = dec!(15);
const MODERATE_NPA_THRESHOLD: Percent = dec!(10);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

fn default_portfolio_size() -> Headcount {
    1_000
}

/// Input for a bank profitability analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAnalysisInput {
    pub category: BankCategory,
    pub loan: LoanTerms,
    /// Annual FarmerPay fee per loan. `None` analyses the current state only.
    #[serde(default)]
    pub farmerpay_fee: Option<Money>,
    /// Number of KCC loans in the portfolio view.
    #[serde(default = "default_portfolio_size")]
    pub portfolio_size: Headcount,
}

/// Signed change of each line item (assisted minus current).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemChanges {
    pub interest_income: Money,
    pub govt_subvention: Money,
    pub other_revenue: Money,
    pub total_revenue: Money,
    pub operating_cost: Money,
    pub npa_provisioning: Money,
    pub platform_fee: Money,
    pub total_cost: Money,
    pub net_profit: Money,
}

/// Where the assisted bank's extra profit comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueComponents {
    pub revenue_increase: Money,
    pub cost_reduction: Money,
    pub provisioning_savings: Money,
    pub farmerpay_fee: Money,
    /// Assisted net profit minus current net profit.
    pub net_value_add: Money,
}

/// Effect of FarmerPay on a single loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerPayImpact {
    pub with_farmerpay: BankFinancials,
    pub changes: LineItemChanges,
    pub value: ValueComponents,
    pub profit_margin: Percent,
    pub profit_margin_change: Percent,
    /// Net value addition as a percentage of the fee.
    pub bank_roi: Percent,
    /// Net value addition relative to |current net profit|.
    pub net_value_improvement: Percent,
    pub revenue_improvement: Percent,
    /// Points of NPA removed by assistance.
    pub npa_reduction: Percent,
    pub monthly_net_value: Money,
    pub break_even: BreakEven,
    pub return_on_loan: Percent,
}

/// Cumulative impact of FarmerPay over [`CUMULATIVE_YEARS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeImpact {
    pub years: u32,
    pub investment: Money,
    pub benefits: Money,
    pub net_value: Money,
    pub roi: Percent,
}

/// FarmerPay effect scaled to a portfolio of loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioFarmerPay {
    pub net_profit: Money,
    pub improvement: Money,
    pub improvement_pct: Percent,
    pub annual_fee_spend: Money,
    pub roi: Percent,
    pub cumulative: CumulativeImpact,
}

/// Portfolio view across `size` identical loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioImpact {
    pub size: Headcount,
    pub net_profit: Money,
    pub total_revenue: Money,
    pub total_cost: Money,
    pub farmerpay: Option<PortfolioFarmerPay>,
}

/// Output of a bank profitability analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAnalysisOutput {
    pub category: BankCategory,
    pub current: BankFinancials,
    pub current_profit_margin: Percent,
    pub current_return_on_loan: Percent,
    pub farmerpay: Option<FarmerPayImpact>,
    pub portfolio: PortfolioImpact,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Breakdown of `loan` for an unassisted bank.
pub fn current_financials(category: BankCategory, loan: &LoanTerms) -> BankFinancials {
    let profile = resolve_bank_profile(category, loan.npa_rate, false);
    calculate_bank_financials(loan, &profile, Decimal::ZERO)
}

/// Breakdown of `loan` for a FarmerPay-assisted bank paying `fee` per loan.
pub fn assisted_financials(category: BankCategory, loan: &LoanTerms, fee: Money) -> BankFinancials {
    let profile = resolve_bank_profile(category, loan.npa_rate, true);
    calculate_bank_financials(loan, &profile, fee)
}

/// Compare `current` against the assisted breakdown at `fee`.
pub fn farmerpay_impact(
    category: BankCategory,
    loan: &LoanTerms,
    current: &BankFinancials,
    fee: Money,
) -> FarmerPayImpact {
    let fp = assisted_financials(category, loan, fee);

    let changes = LineItemChanges {
        interest_income: fp.interest_income - current.interest_income,
        govt_subvention: fp.govt_subvention - current.govt_subvention,
        other_revenue: fp.other_revenue - current.other_revenue,
        total_revenue: fp.total_revenue - current.total_revenue,
        operating_cost: fp.operating_cost - current.operating_cost,
        npa_provisioning: fp.npa_provisioning - current.npa_provisioning,
        platform_fee: fp.platform_fee - current.platform_fee,
        total_cost: fp.total_cost - current.total_cost,
        net_profit: fp.net_profit - current.net_profit,
    };

    let net_value_add = changes.net_profit;
    let value = ValueComponents {
        revenue_increase: changes.total_revenue,
        cost_reduction: current.operating_cost - fp.operating_cost,
        provisioning_savings: current.npa_provisioning - fp.npa_provisioning,
        farmerpay_fee: fee,
        net_value_add,
    };

    let profit_margin = fp.profit_margin();
    let revenue_improvement = if current.total_revenue > Decimal::ZERO {
        (fp.total_revenue / current.total_revenue - Decimal::ONE) * dec!(100)
    } else {
        Decimal::ZERO
    };

    FarmerPayImpact {
        changes,
        profit_margin,
        profit_margin_change: profit_margin - current.profit_margin(),
        bank_roi: percent_of(net_value_add, fee),
        net_value_improvement: safe_ratio(net_value_add, current.net_profit.abs())
            .saturating_mul(dec!(100)),
        revenue_improvement,
        npa_reduction: loan.npa_rate - fp.effective_npa,
        monthly_net_value: net_value_add / dec!(12),
        break_even: break_even(fee, net_value_add),
        return_on_loan: fp.return_on_loan(loan.principal),
        value,
        with_farmerpay: fp,
    }
}

/// Scale a single-loan comparison to a portfolio of `size` loans.
pub fn portfolio_impact(
    size: Headcount,
    current: &BankFinancials,
    impact: Option<&FarmerPayImpact>,
) -> PortfolioImpact {
    let n = Decimal::from(size);
    let net_profit = current.net_profit * n;

    let farmerpay = impact.map(|fp| {
        let fp_profit = fp.with_farmerpay.net_profit * n;
        let improvement = fp_profit - net_profit;
        let annual_fee_spend = fp.value.farmerpay_fee * n;

        let years = Decimal::from(CUMULATIVE_YEARS);
        let investment = annual_fee_spend * years;
        let benefits = improvement * years;
        let cumulative_net = benefits - investment;

        PortfolioFarmerPay {
            net_profit: fp_profit,
            improvement,
            improvement_pct: safe_ratio(improvement, net_profit).saturating_mul(dec!(100)),
            annual_fee_spend,
            roi: percent_of(improvement, annual_fee_spend),
            cumulative: CumulativeImpact {
                years: CUMULATIVE_YEARS,
                investment,
                benefits,
                net_value: cumulative_net,
                roi: percent_of(cumulative_net, investment),
            },
        }
    });

    PortfolioImpact {
        size,
        net_profit,
        total_revenue: current.total_revenue * n,
        total_cost: current.total_cost * n,
        farmerpay,
    }
}

/// Analyse one KCC loan for a lender, with and without FarmerPay.
pub fn analyze_bank(input: &BankAnalysisInput) -> FarmerPayResult<ComputationOutput<BankAnalysisOutput>> {
    let start = Instant::now();
    validate_bank_input(input)?;
    log::debug!(
        "bank analysis: {:?} principal={} npa={}",
        input.category,
        input.loan.principal,
        input.loan.npa_rate
    );

    let mut warnings: Vec<String> = Vec::new();

    let current = current_financials(input.category, &input.loan);
    let farmerpay = input
        .farmerpay_fee
        .map(|fee| farmerpay_impact(input.category, &input.loan, &current, fee));
    let portfolio = portfolio_impact(input.portfolio_size, &current, farmerpay.as_ref());

    if input.loan.npa_rate > HIGH_NPA_THRESHOLD {
        warnings.push(format!(
            "NPA rate {}% is high and significantly impacts profitability",
            input.loan.npa_rate
        ));
    } else if input.loan.npa_rate > MODERATE_NPA_THRESHOLD {
        warnings.push(format!("NPA rate {}% is moderate; monitor closely", input.loan.npa_rate));
    }
    if current.npa_provisioning > current.interest_income {
        warnings.push("NPA provisioning exceeds interest income".into());
    }
    if current.net_profit < Decimal::ZERO {
        warnings.push("Current configuration is loss-making".into());
    }
    if let Some(ref fp) = farmerpay {
        if fp.value.net_value_add <= Decimal::ZERO {
            warnings.push(format!(
                "FarmerPay fee {} exceeds the value it creates ({})",
                fp.value.farmerpay_fee, fp.value.net_value_add
            ));
        }
    }

    let output = BankAnalysisOutput {
        category: input.category,
        current_profit_margin: current.profit_margin(),
        current_return_on_loan: current.return_on_loan(input.loan.principal),
        current,
        farmerpay,
        portfolio,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "KCC Loan Profitability (Current vs FarmerPay)",
        &serde_json::json!({
            "category": input.category.label(),
            "subvention_rate": crate::bank::financials::SUBVENTION_RATE.to_string(),
            "provisioning_coverage": crate::bank::financials::PROVISIONING_COVERAGE.to_string(),
            "npa_reduction_pp": input.category.assisted_npa_reduction().to_string(),
            "portfolio_size": input.portfolio_size,
            "cumulative_years": CUMULATIVE_YEARS,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Range checks shared by every entry point that takes loan terms.
pub fn validate_loan(loan: &LoanTerms) -> FarmerPayResult<()> {
    ensure_within(
        "loan.principal",
        loan.principal,
        limits::MIN_LOAN_AMOUNT,
        limits::MAX_LOAN_AMOUNT,
    )?;
    ensure_within(
        "loan.interest_rate",
        loan.interest_rate,
        limits::MIN_INTEREST_RATE,
        limits::MAX_INTEREST_RATE,
    )?;
    ensure_within(
        "loan.npa_rate",
        loan.npa_rate,
        limits::MIN_NPA_RATE,
        limits::MAX_NPA_RATE,
    )
}

pub fn validate_fee(fee: Money) -> FarmerPayResult<()> {
    ensure_within("farmerpay_fee", fee, Decimal::ZERO, limits::MAX_FARMERPAY_FEE)
}

fn validate_bank_input(input: &BankAnalysisInput) -> FarmerPayResult<()> {
    validate_loan(&input.loan)?;
    if let Some(fee) = input.farmerpay_fee {
        validate_fee(fee)?;
    }
    ensure_count_within(
        "portfolio_size",
        input.portfolio_size,
        limits::MIN_PORTFOLIO_SIZE,
        limits::MAX_PORTFOLIO_SIZE,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
