// Extended text encoding: two characters per point, 4096 levels.
// https://developers.google.com/chart/image/docs/data_formats#extended

use super::slots::TimeSlot;

pub const EXTENDED_MAP: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-.";
const MAP_LEN: usize = EXTENDED_MAP.len();
const LEVELS: usize = MAP_LEN * MAP_LEN;

/// Emitted for values at or above the ceiling.
pub const OVERFLOW: &str = "..";
/// Emitted for missing values and for values below zero.
pub const MISSING: &str = "__";

/// Encodes slot values against `maximum`.
pub fn encode(slots: &[TimeSlot], maximum: f64) -> String {
    encode_values(slots.iter().map(|s| s.value), maximum)
}

pub fn encode_values<I>(values: I, maximum: f64) -> String
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut out = String::new();
    for value in values {
        match value {
            Some(v) => push_point(&mut out, v, maximum),
            None => out.push_str(MISSING),
        }
    }
    out
}

fn push_point(out: &mut String, value: f64, maximum: f64) {
    let scaled = (LEVELS as f64 * value / maximum).floor();
    if scaled > (LEVELS - 1) as f64 {
        out.push_str(OVERFLOW);
    } else if scaled < 0.0 {
        out.push_str(MISSING);
    } else {
        // NaN casts to 0 and encodes as "AA".
        let scaled = scaled as usize;
        let quotient = scaled / MAP_LEN;
        let remainder = scaled - MAP_LEN * quotient;
        out.push(EXTENDED_MAP[quotient] as char);
        out.push(EXTENDED_MAP[remainder] as char);
    }
}
