// Metric trend chart for an alarm: fetch datapoints, bucket, aggregate, encode as a chart URL.

pub mod aggregate;
pub mod encode;
pub mod labels;
pub mod slots;
pub mod url;

pub use aggregate::{aggregate, reduce};
pub use encode::{encode, encode_values};
pub use labels::{label_count, labels};
pub use slots::{TimeSlot, time_slots};
pub use url::{chart_url, top_edge};

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::ChartConfig;
use crate::metrics_repo::{MetricQuery, MetricsClient, MetricsError};
use crate::models::{RawDatapoint, Statistic, Trigger};

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("invalid alarm time {0:?}")]
    InvalidTime(String),
    #[error("query window out of range: {0}")]
    InvalidWindow(String),
    #[error("cannot place {labels} axis labels on {slots} slots")]
    LabelStride { slots: usize, labels: f64 },
}

impl ChartError {
    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartError::Metrics(MetricsError::NoData))
    }
}

/// Builds chart URLs for alarm triggers using a metrics client.
pub struct ChartService {
    metrics: Arc<dyn MetricsClient>,
    config: ChartConfig,
}

impl ChartService {
    pub fn new(metrics: Arc<dyn MetricsClient>, config: ChartConfig) -> Self {
        Self { metrics, config }
    }

    /// Chart of the `lookback_secs` before `time` (the alarm's state change).
    #[instrument(skip(self, trigger, region), fields(metric = %trigger.metric_name, region = %region))]
    pub async fn chart_for(
        &self,
        trigger: &Trigger,
        region: &str,
        time: &str,
        account_id: &str,
    ) -> Result<String, ChartError> {
        let end = parse_event_time(time)?;
        let start = i64::try_from(self.config.lookback_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lookback| end.checked_sub_signed(lookback))
            .ok_or_else(|| {
                ChartError::InvalidWindow(format!("lookback of {}s", self.config.lookback_secs))
            })?;
        let period_secs = i32::try_from(self.config.period_secs).map_err(|_| {
            ChartError::InvalidWindow(format!("period of {}s", self.config.period_secs))
        })?;
        let statistic = Statistic::from_trigger(&trigger.statistic);
        let query = MetricQuery {
            region: region.to_string(),
            account_id: account_id.to_string(),
            namespace: trigger.namespace.clone(),
            metric_name: trigger.metric_name.clone(),
            dimensions: trigger.dimensions.clone(),
            statistic: statistic.clone(),
            unit: trigger.unit.clone(),
            start,
            end,
            period_secs,
        };

        let datapoints = self.metrics.fetch_datapoints(&query).await?;
        debug!(datapoints = datapoints.len(), "fetched datapoints");
        render(&self.config, trigger, start, end, &statistic, &datapoints)
    }
}

/// Runs the pure pipeline over already-fetched datapoints.
pub fn render(
    config: &ChartConfig,
    trigger: &Trigger,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    statistic: &Statistic,
    datapoints: &[RawDatapoint],
) -> Result<String, ChartError> {
    if datapoints.is_empty() {
        return Err(MetricsError::NoData.into());
    }
    let slots = time_slots(start, end, config.samples);
    let axis = labels(&slots, label_count(config.width, config.label_spacing_px))?;
    let aggregates = aggregate(slots, datapoints, statistic);
    Ok(chart_url(config, &axis, trigger, &aggregates))
}

/// Accepts RFC 3339 and the `+0000` offset form CloudWatch uses.
pub fn parse_event_time(time: &str) -> Result<DateTime<Utc>, ChartError> {
    DateTime::parse_from_rfc3339(time)
        .or_else(|_| DateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ChartError::InvalidTime(time.to_string()))
}
