// Chart request URL: fixed parameter order, data series in extended encoding.

use crate::config::ChartConfig;
use super::encode::{encode, encode_values};
use super::slots::TimeSlot;
use crate::models::Trigger;

const HEADROOM: f64 = 1.05;

/// Vertical ceiling: 5% above the larger of the observed maximum and the
/// threshold, so the threshold line is always on the chart.
pub fn top_edge(aggregates: &[TimeSlot], threshold: f64) -> f64 {
    let observed = aggregates
        .iter()
        .map(|slot| slot.value.unwrap_or(0.0))
        .fold(f64::NEG_INFINITY, f64::max);
    if observed > threshold {
        observed * HEADROOM
    } else {
        threshold * HEADROOM
    }
}

/// Builds the chart request for the aggregate series and the alarm threshold.
pub fn chart_url(
    settings: &ChartConfig,
    labels: &[String],
    trigger: &Trigger,
    aggregates: &[TimeSlot],
) -> String {
    let top = top_edge(aggregates, trigger.threshold);
    let grid_step = (top / settings.height as f64 * 20.0).floor();
    let legend = format!(
        "{} ({}/{}s)",
        trigger.metric_name, trigger.statistic, trigger.period
    );
    let threshold_series =
        encode_values(std::iter::repeat_n(Some(trigger.threshold), aggregates.len()), top);

    let params = [
        "cht=ls".to_string(),
        "chma=20,15,5,5|0,20".to_string(),
        "chxt=x,y".to_string(),
        format!("chxl=0:|{}", labels.join("|")),
        "chco=af9cf4,FF0000".to_string(),
        "chls=2|.5,5,5".to_string(),
        format!("chs={}x{}", settings.width, settings.height),
        format!("chxr=1,0,{},{}", top, grid_step),
        "chg=20,10,1,5".to_string(),
        format!("chdl={}", encode_uri_component(&legend)),
        "chdlp=b".to_string(),
        format!("chd=e:{},{}", encode(aggregates, top), threshold_series),
    ];
    format!("{}?{}", settings.base_url, params.join("&"))
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(s: &str) -> String {
    urlencoding::encode(s)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}
