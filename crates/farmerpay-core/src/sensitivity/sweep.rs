//! One-dimensional parameter sweeps.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FarmerPayError;
use crate::FarmerPayResult;

/// Metrics produced for one swept value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint<T> {
    pub value: Decimal,
    pub metrics: T,
}

/// Evaluate `metric_fn` at every value, preserving order.
pub fn sweep<T, F>(values: &[Decimal], mut metric_fn: F) -> Vec<SweepPoint<T>>
where
    F: FnMut(Decimal) -> T,
{
    values
        .iter()
        .map(|&value| SweepPoint {
            value,
            metrics: metric_fn(value),
        })
        .collect()
}

/// Values from `min` to `max` inclusive in `step` increments. `max` is
/// appended when the step does not land on it exactly.
pub fn sweep_values(min: Decimal, max: Decimal, step: Decimal) -> FarmerPayResult<Vec<Decimal>> {
    if step <= Decimal::ZERO {
        return Err(FarmerPayError::invalid("sweep.step", "Step must be positive"));
    }
    if min > max {
        return Err(FarmerPayError::invalid("sweep.min", "Min must be <= max"));
    }

    let mut values = Vec::new();
    let mut current = min;
    while current <= max {
        values.push(current);
        current += step;
    }
    if let Some(&last) = values.last() {
        if last < max {
            values.push(max);
        }
    }
    Ok(values)
}

/// `start, start + step, ...` strictly below `limit`. Empty when
/// `start >= limit` or `step` is not positive.
pub fn values_below(start: Decimal, step: Decimal, limit: Decimal) -> Vec<Decimal> {
    if step <= Decimal::ZERO {
        return Vec::new();
    }
    std::iter::successors(Some(start), |v| Some(*v + step))
        .take_while(|v| *v < limit)
        .collect()
}
