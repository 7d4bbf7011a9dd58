// CloudWatch GetMetricStatistics via the AWS SDK, with optional cross-account role assumption.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatch::config::{Credentials, Region};
use aws_sdk_cloudwatch::primitives::DateTime as AwsDateTime;
use aws_sdk_cloudwatch::types::{Datapoint, Dimension as AwsDimension, StandardUnit};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use super::{MetricQuery, MetricsClient, MetricsError};
use crate::config::AwsConfig;
use crate::models::RawDatapoint;

/// Builds a fresh SDK client per query, since every alarm names its own region and account.
pub struct CloudWatchClient {
    config: AwsConfig,
}

impl CloudWatchClient {
    pub fn new(config: AwsConfig) -> Self {
        Self { config }
    }

    async fn client(&self, region: &str, account_id: &str) -> Result<aws_sdk_cloudwatch::Client, MetricsError> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let Some(role_name) = self.config.assume_role_name.as_deref() else {
            return Ok(aws_sdk_cloudwatch::Client::new(&sdk_config));
        };

        let role_arn = format!("arn:aws:iam::{}:role/{}", account_id, role_name);
        debug!(role_arn = %role_arn, "assuming role");
        let response = aws_sdk_sts::Client::new(&sdk_config)
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(&self.config.session_name)
            .send()
            .await
            .map_err(|e| MetricsError::AssumeRole(e.to_string()))?;
        let creds = response
            .credentials()
            .ok_or_else(|| MetricsError::AssumeRole("no credentials returned".into()))?;

        let credentials = Credentials::new(
            creds.access_key_id(),
            creds.secret_access_key(),
            Some(creds.session_token().to_string()),
            None,
            "assume-role",
        );
        let cw_config = aws_sdk_cloudwatch::config::Builder::from(&sdk_config)
            .credentials_provider(credentials)
            .build();
        Ok(aws_sdk_cloudwatch::Client::from_conf(cw_config))
    }
}

#[async_trait]
impl MetricsClient for CloudWatchClient {
    #[instrument(skip(self, query), fields(repo = "cloudwatch", operation = "get_metric_statistics", metric = %query.metric_name))]
    async fn fetch_datapoints(&self, query: &MetricQuery) -> Result<Vec<RawDatapoint>, MetricsError> {
        let client = self.client(&query.region, &query.account_id).await?;
        let dimensions = query
            .dimensions
            .iter()
            .map(|d| AwsDimension::builder().name(&d.name).value(&d.value).build())
            .collect();

        let output = client
            .get_metric_statistics()
            .namespace(&query.namespace)
            .metric_name(&query.metric_name)
            .set_dimensions(Some(dimensions))
            .statistics(query.statistic.as_str().into())
            .set_unit(query.unit.as_deref().map(StandardUnit::from))
            .start_time(AwsDateTime::from_millis(query.start.timestamp_millis()))
            .end_time(AwsDateTime::from_millis(query.end.timestamp_millis()))
            .period(query.period_secs)
            .send()
            .await
            .map_err(|e| MetricsError::Request(e.to_string()))?;

        let datapoints: Vec<RawDatapoint> = output.datapoints().iter().filter_map(convert).collect();
        if datapoints.is_empty() {
            return Err(MetricsError::NoData);
        }
        Ok(datapoints)
    }
}

fn convert(point: &Datapoint) -> Option<RawDatapoint> {
    let millis = match point.timestamp().map(|t| t.to_millis()) {
        Some(Ok(ms)) => ms,
        _ => {
            warn!("skipping datapoint without a usable timestamp");
            return None;
        }
    };
    let timestamp: DateTime<Utc> = DateTime::from_timestamp_millis(millis)?;
    Some(RawDatapoint {
        timestamp,
        average: point.average(),
        maximum: point.maximum(),
        minimum: point.minimum(),
        sample_count: point.sample_count(),
        sum: point.sum(),
        unit: point.unit().map(|u| u.as_str().to_string()),
    })
}
