// Slot aggregation: bucket raw datapoints by timestamp and reduce them per statistic.

use super::slots::TimeSlot;
use crate::models::{RawDatapoint, Statistic};

/// Reduces the readings of one slot.
///
/// Empty input: `Average` is `0` (divides by one); `Maximum`, `Minimum`, `Sum`
/// and `SampleCount` are `None`. Unknown statistics are always `None`.
pub fn reduce(statistic: &Statistic, values: &[f64]) -> Option<f64> {
    match statistic {
        Statistic::Average => Some(values.iter().sum::<f64>() / values.len().max(1) as f64),
        Statistic::Maximum => values.iter().copied().reduce(f64::max),
        Statistic::Minimum => values.iter().copied().reduce(f64::min),
        // SampleCount is reduced like Sum: the counts of sub-periods add up.
        Statistic::SampleCount | Statistic::Sum => values.iter().copied().reduce(|a, b| a + b),
        Statistic::Other(_) => None,
    }
}

/// Fills each slot's value from the datapoints in `(from, to]`.
///
/// A datapoint on a boundary belongs to the slot it closes. Zero (and NaN)
/// readings are dropped before reduction, exactly like missing readings.
pub fn aggregate(
    slots: Vec<TimeSlot>,
    datapoints: &[RawDatapoint],
    statistic: &Statistic,
) -> Vec<TimeSlot> {
    slots
        .into_iter()
        .map(|slot| {
            let points: Vec<f64> = datapoints
                .iter()
                .filter(|d| {
                    let t = d.timestamp.timestamp_millis() as f64;
                    t > slot.from && t <= slot.to
                })
                .filter_map(|d| d.value_of(statistic))
                .filter(|v| *v != 0.0 && !v.is_nan())
                .collect();
            TimeSlot {
                value: reduce(statistic, &points),
                ..slot
            }
        })
        .collect()
}
