//! Search for the FarmerPay fee that adds the most value to a bank.
//!
//! Each category has its own fee band. A fee is only recommended when it
//! produces strictly positive net value; otherwise the result says so
//! explicitly rather than falling back to an end of the band.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bank::comparison::{current_financials, farmerpay_impact, validate_loan};
use crate::bank::financials::LoanTerms;
use crate::bank::profile::BankCategory;
use crate::returns::BreakEven;
use crate::sensitivity::sweep::{sweep, sweep_values, SweepPoint};
use crate::types::*;
use crate::FarmerPayResult;

pub const FEE_STEP: Money = dec!(50);

/// Inclusive fee band searched for `category`.
pub fn fee_range(category: BankCategory) -> (Money, Money) {
    match category {
        BankCategory::ScheduledCommercial => (dec!(600), dec!(1000)),
        BankCategory::RegionalRural => (dec!(450), dec!(750)),
        BankCategory::Cooperative => (dec!(350), dec!(650)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeOptimizationInput {
    pub category: BankCategory,
    pub loan: LoanTerms,
}

/// Bank-side outcome of charging one fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeMetrics {
    pub assisted_net_profit: Money,
    pub net_value_add: Money,
    /// Net value add over the fee, in points.
    pub roi: Percent,
    pub monthly_value: Money,
    pub break_even: BreakEven,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeeRecommendation {
    Recommended {
        fee: Money,
        net_value_add: Money,
        roi: Percent,
    },
    NoViableFee,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeOptimizationOutput {
    pub category: BankCategory,
    pub current_net_profit: Money,
    pub points: Vec<SweepPoint<FeeMetrics>>,
    pub recommendation: FeeRecommendation,
}

/// Metrics for every fee in `category`'s band.
pub fn fee_sweep(category: BankCategory, loan: &LoanTerms) -> Vec<SweepPoint<FeeMetrics>> {
    let (min, max) = fee_range(category);
    let fees = sweep_values(min, max, FEE_STEP).unwrap_or_default();
    let current = current_financials(category, loan);
    sweep(&fees, |fee| {
        let impact = farmerpay_impact(category, loan, &current, fee);
        FeeMetrics {
            assisted_net_profit: impact.with_farmerpay.net_profit,
            net_value_add: impact.value.net_value_add,
            roi: impact.bank_roi,
            monthly_value: impact.monthly_net_value,
            break_even: impact.break_even,
        }
    })
}

/// Highest strictly positive net value add; the earliest (lowest) fee wins ties.
pub fn recommend_fee(points: &[SweepPoint<FeeMetrics>]) -> FeeRecommendation {
    points
        .iter()
        .filter(|p| p.metrics.net_value_add > Decimal::ZERO)
        .fold(None::<&SweepPoint<FeeMetrics>>, |best, p| match best {
            Some(b) if b.metrics.net_value_add >= p.metrics.net_value_add => Some(b),
            _ => Some(p),
        })
        .map_or(FeeRecommendation::NoViableFee, |p| FeeRecommendation::Recommended {
            fee: p.value,
            net_value_add: p.metrics.net_value_add,
            roi: p.metrics.roi,
        })
}

pub fn analyze_fee_optimization(
    input: &FeeOptimizationInput,
) -> FarmerPayResult<ComputationOutput<FeeOptimizationOutput>> {
    let start = Instant::now();
    validate_loan(&input.loan)?;
    log::debug!(
        "fee optimization: {:?} npa={}",
        input.category,
        input.loan.npa_rate
    );

    let mut warnings: Vec<String> = Vec::new();
    let points = fee_sweep(input.category, &input.loan);
    let recommendation = recommend_fee(&points);
    if recommendation == FeeRecommendation::NoViableFee {
        let (min, max) = fee_range(input.category);
        warnings.push(format!(
            "No fee between {min} and {max} creates positive value for this bank"
        ));
    }

    let output = FeeOptimizationOutput {
        category: input.category,
        current_net_profit: current_financials(input.category, &input.loan).net_profit,
        points,
        recommendation,
    };

    let (min, max) = fee_range(input.category);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "FarmerPay Fee Optimization",
        &serde_json::json!({
            "category": input.category.label(),
            "fee_min": min.to_string(),
            "fee_max": max.to_string(),
            "fee_step": FEE_STEP.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
