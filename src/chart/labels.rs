// Axis label selection: every n-th slot label, counted back from the last slot.

use super::ChartError;
use super::slots::TimeSlot;

/// Number of labels that fit a chart `width` pixels wide at `spacing_px` per label.
pub fn label_count(width: u32, spacing_px: u32) -> f64 {
    width as f64 / spacing_px as f64
}

/// Picks labels so the last slot is always labelled and the rest are spaced
/// `floor(slots / desired)` apart.
pub fn labels(slots: &[TimeSlot], desired: f64) -> Result<Vec<String>, ChartError> {
    let stride = (slots.len() as f64 / desired).floor();
    if stride.is_nan() || stride < 1.0 {
        return Err(ChartError::LabelStride {
            slots: slots.len(),
            labels: desired,
        });
    }
    let stride = stride as usize;
    let last = slots.len() - 1;
    Ok(slots
        .iter()
        .enumerate()
        .filter(|(i, _)| (last - i) % stride == 0)
        .map(|(_, slot)| slot.text.clone())
        .collect())
}
