// Inbound event recognition: which AWS payload an SNS message carries.

pub mod cloudwatch;
pub mod codedeploy;

use serde_json::Value;

use crate::models::{CloudwatchAlarm, CodedeployEvent};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unable to process event as it is not recognised")]
    Unrecognised,
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertEvent {
    CloudwatchAlarm(Box<CloudwatchAlarm>),
    Codedeploy(CodedeployEvent),
}

/// Classifies an SNS message body by the keys it carries.
pub fn match_event(message: &str) -> Result<AlertEvent, ParseError> {
    let value: Value = serde_json::from_str(message)?;
    if has_text(&value, "AlarmName") && has_text(&value, "AlarmDescription") {
        return Ok(AlertEvent::CloudwatchAlarm(Box::new(serde_json::from_value(value)?)));
    }
    if has_text(&value, "deploymentGroupName") && has_text(&value, "deploymentId") {
        return Ok(AlertEvent::Codedeploy(serde_json::from_value(value)?));
    }
    Err(ParseError::Unrecognised)
}

fn has_text(value: &Value, key: &str) -> bool {
    value
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}
