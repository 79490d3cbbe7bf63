//! Combined value of FarmerPay to its partner banks and to itself.
//!
//! Every farmer is assumed to hold one KCC loan with the partner bank, and
//! the bank pays the platform's core fee per loan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bank::comparison::{current_financials, farmerpay_impact, validate_loan, ValueComponents};
use crate::bank::financials::LoanTerms;
use crate::bank::profile::BankCategory;
use crate::platform::analysis::{evaluate_at_scale, PlatformConfig, ScalePoint};
use crate::returns::{safe_ratio, BreakEven};
use crate::types::*;
use crate::FarmerPayResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcosystemInput {
    pub category: BankCategory,
    pub loan: LoanTerms,
    #[serde(default)]
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcosystemOutput {
    pub farmers: Headcount,
    /// Fee charged to the bank per loan (the platform core fee).
    pub bank_fee: Money,
    pub bank_value: ValueComponents,
    pub bank_break_even: BreakEven,
    pub platform: ScalePoint,
    /// Net value add per loan times the number of farmers.
    pub total_bank_value_addition: Money,
    /// Platform net profit plus bank value addition.
    pub ecosystem_value: Money,
    pub value_per_farmer: Money,
}

pub fn analyze_ecosystem(input: &EcosystemInput) -> FarmerPayResult<ComputationOutput<EcosystemOutput>> {
    let start = Instant::now();
    validate_loan(&input.loan)?;
    input.platform.validate()?;
    log::debug!(
        "ecosystem analysis: {:?} farmers={}",
        input.category,
        input.platform.farmers
    );

    let mut warnings: Vec<String> = Vec::new();

    let platform = evaluate_at_scale(&input.platform, input.platform.farmers);
    let bank_fee = platform.unit_economics.core_fee;
    let current = current_financials(input.category, &input.loan);
    let impact = farmerpay_impact(input.category, &input.loan, &current, bank_fee);

    let farmers = Decimal::from(input.platform.farmers);
    let total_bank_value_addition = impact.value.net_value_add * farmers;
    let ecosystem_value = platform.financials.net_profit + total_bank_value_addition;

    if impact.value.net_value_add <= Decimal::ZERO {
        warnings.push(format!(
            "Core fee {bank_fee} exceeds the value FarmerPay creates for a {} loan",
            input.category.label()
        ));
    }
    if platform.financials.net_profit <= Decimal::ZERO {
        warnings.push("Platform does not make a profit at this scale".into());
    }

    let output = EcosystemOutput {
        farmers: input.platform.farmers,
        bank_fee,
        bank_break_even: impact.break_even,
        bank_value: impact.value,
        platform,
        total_bank_value_addition,
        ecosystem_value,
        value_per_farmer: safe_ratio(ecosystem_value, farmers),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "FarmerPay Ecosystem Value (platform + partner banks)",
        &serde_json::json!({
            "category": input.category.label(),
            "loans_per_farmer": 1,
            "bank_fee_source": "platform core fee",
        }),
        warnings,
        elapsed,
        output,
    ))
}
