// CloudWatch alarm state-change payload (the SNS `Message` body)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudwatchAlarm {
    pub alarm_name: String,
    #[serde(default)]
    pub alarm_description: Option<String>,
    #[serde(rename = "AWSAccountId")]
    pub aws_account_id: String,
    pub new_state_value: String,
    pub new_state_reason: String,
    pub state_change_time: String,
    pub region: String,
    pub old_state_value: String,
    pub trigger: Trigger,
}

/// Metric definition the alarm evaluates; drives the chart query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trigger {
    pub metric_name: String,
    pub namespace: String,
    #[serde(default)]
    pub statistic: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    pub period: i32,
    #[serde(default)]
    pub evaluation_periods: u32,
    #[serde(default)]
    pub comparison_operator: String,
    pub threshold: f64,
}

/// Alarm payloads use lowercase keys for dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}
