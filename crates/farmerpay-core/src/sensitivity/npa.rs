//! Bank profit sensitivity to the portfolio NPA rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bank::comparison::{assisted_financials, current_financials, validate_fee, validate_loan};
use crate::bank::financials::LoanTerms;
use crate::bank::profile::BankCategory;
use crate::sensitivity::sweep::{sweep, values_below, SweepPoint};
use crate::types::*;
use crate::FarmerPayResult;

/// First NPA rate swept, and the step between rates.
pub const NPA_SWEEP_STEP: Percent = dec!(0.5);
/// The sweep never reaches this NPA rate.
pub const NPA_SWEEP_CAP: Percent = dec!(25);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpaSensitivityInput {
    pub category: BankCategory,
    /// Loan terms; `npa_rate` sets the sweep range (up to twice this rate).
    pub loan: LoanTerms,
    #[serde(default)]
    pub farmerpay_fee: Option<Money>,
}

/// Bank metrics at one NPA rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpaMetrics {
    pub net_profit: Money,
    pub npa_provisioning: Money,
    pub total_revenue: Money,
    pub assisted_net_profit: Option<Money>,
    pub net_value_add: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpaSensitivityOutput {
    pub category: BankCategory,
    pub current_npa: Percent,
    pub points: Vec<SweepPoint<NpaMetrics>>,
    /// Lowest swept NPA at which the unassisted bank loses money.
    pub loss_threshold: Option<Percent>,
}

/// NPA rates swept around `npa_rate`: 0.5, 1.0, ... below `min(25, 2 * npa)`.
pub fn npa_sweep_values(npa_rate: Percent) -> Vec<Percent> {
    values_below(NPA_SWEEP_STEP, NPA_SWEEP_STEP, NPA_SWEEP_CAP.min(npa_rate * dec!(2)))
}

/// Unassisted (and optionally assisted) bank metrics at each NPA rate.
pub fn npa_sensitivity(
    category: BankCategory,
    loan: &LoanTerms,
    fee: Option<Money>,
) -> Vec<SweepPoint<NpaMetrics>> {
    sweep(&npa_sweep_values(loan.npa_rate), |npa_rate| {
        let at_npa = LoanTerms {
            npa_rate,
            ..loan.clone()
        };
        let current = current_financials(category, &at_npa);
        let assisted = fee.map(|f| assisted_financials(category, &at_npa, f));
        NpaMetrics {
            net_profit: current.net_profit,
            npa_provisioning: current.npa_provisioning,
            total_revenue: current.total_revenue,
            assisted_net_profit: assisted.as_ref().map(|a| a.net_profit),
            net_value_add: assisted.as_ref().map(|a| a.net_profit - current.net_profit),
        }
    })
}

pub fn analyze_npa_sensitivity(
    input: &NpaSensitivityInput,
) -> FarmerPayResult<ComputationOutput<NpaSensitivityOutput>> {
    let start = Instant::now();
    validate_loan(&input.loan)?;
    if let Some(fee) = input.farmerpay_fee {
        validate_fee(fee)?;
    }
    log::debug!(
        "npa sensitivity: {:?} npa={}",
        input.category,
        input.loan.npa_rate
    );

    let mut warnings: Vec<String> = Vec::new();
    let points = npa_sensitivity(input.category, &input.loan, input.farmerpay_fee);
    if points.is_empty() {
        warnings.push(format!(
            "NPA rate {}% leaves no sweep range below {}%",
            input.loan.npa_rate,
            input.loan.npa_rate * dec!(2)
        ));
    }

    let loss_threshold = points
        .iter()
        .find(|p| p.metrics.net_profit < Decimal::ZERO)
        .map(|p| p.value);

    let output = NpaSensitivityOutput {
        category: input.category,
        current_npa: input.loan.npa_rate,
        points,
        loss_threshold,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "NPA Sensitivity Sweep",
        &serde_json::json!({
            "category": input.category.label(),
            "step": NPA_SWEEP_STEP.to_string(),
            "cap": NPA_SWEEP_CAP.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(npa_rate: Percent) -> LoanTerms {
        LoanTerms {
            principal: dec!(120_000),
            interest_rate: dec!(7),
            npa_rate,
        }
    }

    #[test]
    fn test_sweep_range_doubles_npa() {
        let vals = npa_sweep_values(dec!(7.1));
        assert_eq!(vals.first().copied(), Some(dec!(0.5)));
        assert_eq!(vals.last().copied(), Some(dec!(14.0)));
        assert_eq!(vals.len(), 28);
    }

    #[test]
    fn test_sweep_range_capped_at_25() {
        let vals = npa_sweep_values(dec!(20));
        assert_eq!(vals.last().copied(), Some(dec!(24.5)));
        assert_eq!(vals.len(), 49);
    }

    #[test]
    fn test_sweep_empty_for_tiny_npa() {
        assert!(npa_sweep_values(dec!(0)).is_empty());
        assert!(npa_sweep_values(dec!(0.25)).is_empty());
    }

    #[test]
    fn test_profit_falls_as_npa_rises() {
        let points = npa_sensitivity(BankCategory::ScheduledCommercial, &loan(dec!(14.16)), None);
        for pair in points.windows(2) {
            assert!(pair[1].metrics.net_profit <= pair[0].metrics.net_profit);
            assert!(pair[1].metrics.npa_provisioning > pair[0].metrics.npa_provisioning);
        }
        assert!(points.iter().all(|p| p.metrics.net_value_add.is_none()));
    }

    #[test]
    fn test_assisted_columns_with_fee() {
        let points =
            npa_sensitivity(BankCategory::RegionalRural, &loan(dec!(7.1)), Some(dec!(600)));
        for p in &points {
            let assisted = p.metrics.assisted_net_profit.unwrap();
            assert_eq!(p.metrics.net_value_add, Some(assisted - p.metrics.net_profit));
        }
    }

    #[test]
    fn test_analyze_reports_loss_threshold() {
        let input = NpaSensitivityInput {
            category: BankCategory::ScheduledCommercial,
            loan: loan(dec!(14.16)),
            farmerpay_fee: None,
        };
        let out = analyze_npa_sensitivity(&input).unwrap();
        let threshold = out.result.loss_threshold.unwrap();
        let first_loss = out
            .result
            .points
            .iter()
            .find(|p| p.value == threshold)
            .unwrap();
        assert!(first_loss.metrics.net_profit < Decimal::ZERO);
        assert!(out
            .result
            .points
            .iter()
            .filter(|p| p.value < threshold)
            .all(|p| p.metrics.net_profit >= Decimal::ZERO));
    }

    #[test]
    fn test_analyze_warns_on_empty_range() {
        let input = NpaSensitivityInput {
            category: BankCategory::Cooperative,
            loan: loan(dec!(0)),
            farmerpay_fee: None,
        };
        let out = analyze_npa_sensitivity(&input).unwrap();
        assert!(out.result.points.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }
}
