// Slot generation: split [start, end] into equal, contiguous time buckets.

use chrono::{DateTime, Utc};

/// One bucket of the chart's x axis. Bounds are epoch milliseconds and may be
/// fractional; `value` is set by aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    /// UTC `HH:MM` of the `to` boundary.
    pub text: String,
    pub from: f64,
    pub to: f64,
    pub value: Option<f64>,
}

/// Produces up to `samples` slots of width `(end - start) / samples`.
///
/// Widths stay in floating point. A boundary whose millisecond (truncated) lies
/// after `end` is dropped, so accumulated rounding can yield one slot fewer than
/// `samples`. `end <= start` yields no slots, as does a width too small to
/// advance the cursor.
pub fn time_slots(start: DateTime<Utc>, end: DateTime<Utc>, samples: usize) -> Vec<TimeSlot> {
    let start_ms = start.timestamp_millis() as f64;
    let end_ms = end.timestamp_millis() as f64;
    if end_ms <= start_ms || samples == 0 {
        return Vec::new();
    }

    let width = (end_ms - start_ms) / samples as f64;
    let mut slots = Vec::with_capacity(samples);
    let mut cursor = start_ms;
    while cursor <= end_ms {
        let from = cursor;
        cursor += width;
        // Width below the float spacing at this magnitude.
        if cursor <= from {
            break;
        }
        if cursor.trunc() <= end_ms {
            slots.push(TimeSlot {
                text: slot_label(cursor),
                from,
                to: cursor,
                value: None,
            });
        }
    }
    slots
}

fn slot_label(ms: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms.trunc() as i64)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}
