// Metrics service boundary: the query the chart needs and the client that answers it.

mod cloudwatch;

pub use cloudwatch::CloudWatchClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Dimension, RawDatapoint, Statistic};

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Cloudwatch did not return any data points")]
    NoData,
    #[error("Could not assume role: {0}")]
    AssumeRole(String),
    #[error("metrics request failed: {0}")]
    Request(String),
}

/// Statistics request for one metric over `[start, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricQuery {
    pub region: String,
    pub account_id: String,
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    pub statistic: Statistic,
    pub unit: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub period_secs: i32,
}

#[async_trait]
pub trait MetricsClient: Send + Sync {
    async fn fetch_datapoints(&self, query: &MetricQuery) -> Result<Vec<RawDatapoint>, MetricsError>;
}
