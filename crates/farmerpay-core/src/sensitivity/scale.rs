//! Platform economics across farmer counts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FarmerPayError;
use crate::platform::analysis::{evaluate_at_scale, PlatformConfig, ScalePoint};
use crate::types::*;
use crate::FarmerPayResult;

pub const DEFAULT_SCALES: [Headcount; 9] = [
    1_000, 5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingInput {
    /// The configured farmer count is ignored; each scale replaces it.
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Farmer counts to evaluate. Defaults to [`DEFAULT_SCALES`].
    #[serde(default)]
    pub scales: Option<Vec<Headcount>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingOutput {
    pub points: Vec<ScalePoint>,
    /// Smallest evaluated scale with positive net profit.
    pub first_profitable_scale: Option<Headcount>,
    /// Scale with the highest ROI; the smaller scale wins ties.
    pub best_roi_scale: Option<Headcount>,
}

/// Re-resolve cost and partnership tiers and recompute the P&L at each scale.
pub fn scale_sweep(config: &PlatformConfig, scales: &[Headcount]) -> Vec<ScalePoint> {
    scales
        .iter()
        .map(|&farmers| evaluate_at_scale(config, farmers))
        .collect()
}

pub fn analyze_scaling(input: &ScalingInput) -> FarmerPayResult<ComputationOutput<ScalingOutput>> {
    let start = Instant::now();
    let scales = input.scales.as_deref().unwrap_or(&DEFAULT_SCALES[..]);
    if scales.is_empty() {
        return Err(FarmerPayError::InsufficientData(
            "At least one farmer count required".into(),
        ));
    }
    for &farmers in scales {
        PlatformConfig {
            farmers,
            ..input.platform.clone()
        }
        .validate()?;
    }
    log::debug!("scale sweep over {} farmer counts", scales.len());

    let mut warnings: Vec<String> = Vec::new();
    let points = scale_sweep(&input.platform, scales);

    let first_profitable_scale = points
        .iter()
        .filter(|p| p.financials.net_profit > Decimal::ZERO)
        .map(|p| p.farmers)
        .min();
    if first_profitable_scale.is_none() {
        warnings.push("Platform is not profitable at any evaluated scale".into());
    }
    let best_roi_scale = points
        .iter()
        .fold(None::<&ScalePoint>, |best, p| match best {
            Some(b) if b.roi > p.roi || (b.roi == p.roi && b.farmers <= p.farmers) => Some(b),
            _ => Some(p),
        })
        .map(|p| p.farmers);

    let output = ScalingOutput {
        points,
        first_profitable_scale,
        best_roi_scale,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "FarmerPay Business Scaling",
        &serde_json::json!({
            "scales": scales,
            "pricing": input.platform.pricing,
            "economies_of_scale": input.platform.economies_of_scale,
            "partnership_optimization": input.platform.partnership_optimization,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_scales() {
        let out = analyze_scaling(&ScalingInput {
            platform: PlatformConfig::default(),
            scales: None,
        })
        .unwrap();
        assert_eq!(out.result.points.len(), 9);
        assert_eq!(out.result.first_profitable_scale, Some(1_000));
    }

    #[test]
    fn test_investment_step_changes_roi() {
        // Flat 800 fee, 500 cost, 30% partnership: 210 net per farmer.
        let points = scale_sweep(&PlatformConfig::default(), &[10_000, 10_001]);
        assert_eq!(points[0].financials.net_profit, dec!(2_100_000));
        assert_eq!(points[0].roi, dec!(4.2));
        assert_eq!(points[1].investment, dec!(100_000_000));
        assert!(points[1].roi < points[0].roi);
    }

    #[test]
    fn test_tiers_reresolved_per_scale() {
        let config = PlatformConfig {
            economies_of_scale: true,
            partnership_optimization: true,
            ..PlatformConfig::default()
        };
        let points = scale_sweep(&config, &[10_000, 1_000_000]);
        assert_eq!(points[0].unit_economics.cost_per_farmer, dec!(500));
        assert_eq!(points[0].unit_economics.partnership_rate, dec!(0.25));
        assert_eq!(points[1].unit_economics.cost_per_farmer, dec!(420));
        assert_eq!(points[1].unit_economics.partnership_rate, dec!(0.18));
    }

    #[test]
    fn test_best_roi_scale() {
        let out = analyze_scaling(&ScalingInput {
            platform: PlatformConfig::default(),
            scales: Some(vec![10_000, 100_000, 1_000_000]),
        })
        .unwrap();
        // 210/farmer: 4.2%, 21%, 105%
        assert_eq!(out.result.best_roi_scale, Some(1_000_000));
    }

    #[test]
    fn test_unprofitable_everywhere_warns() {
        let out = analyze_scaling(&ScalingInput {
            platform: PlatformConfig {
                base_fee: dec!(400),
                ..PlatformConfig::default()
            },
            scales: Some(vec![1_000, 50_000]),
        })
        .unwrap();
        assert_eq!(out.result.first_profitable_scale, None);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_rejects_out_of_range_scale() {
        let result = analyze_scaling(&ScalingInput {
            platform: PlatformConfig::default(),
            scales: Some(vec![500]),
        });
        assert!(result.is_err());
        assert!(analyze_scaling(&ScalingInput {
            platform: PlatformConfig::default(),
            scales: Some(vec![]),
        })
        .is_err());
    }
}
