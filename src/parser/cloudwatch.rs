// CloudWatch alarm -> Slack message, with the metric chart when one can be built.

use chrono::SecondsFormat;
use tracing::info;

use crate::chart::{ChartService, parse_event_time};
use crate::models::{Attachment, CloudwatchAlarm, SlackMessage};
use crate::slack::{self, SlackError, TextKind, colours};

pub const CHART_ALT_TEXT: &str = "CloudWatch metrics graph";

/// Builds the alarm message; a chart failure only drops the image.
pub async fn cloudwatch_parse(
    alarm: &CloudwatchAlarm,
    subject: &str,
    charts: &ChartService,
) -> Result<SlackMessage, SlackError> {
    let region = region_id(&alarm.region);
    let chart_url = match charts
        .chart_for(
            &alarm.trigger,
            region,
            &alarm.state_change_time,
            &alarm.aws_account_id,
        )
        .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            info!(alarm = %alarm.alarm_name, "Could not build chart: {}", e);
            None
        }
    };
    alarm_message(subject, region, alarm, chart_url.as_deref())
}

pub fn alarm_message(
    subject: &str,
    region: &str,
    alarm: &CloudwatchAlarm,
    image_url: Option<&str>,
) -> Result<SlackMessage, SlackError> {
    let link = format!(
        "https://console.aws.amazon.com/cloudwatch/home?region={}#alarm:name={}",
        region, alarm.alarm_name
    );

    let mut attachment_blocks = vec![slack::field_section(
        TextKind::Mrkdwn,
        [
            format!(
                "*State Change:*\n {} -> {}",
                alarm.old_state_value, alarm.new_state_value
            ),
            format!("*Region:*\n {}", alarm.region),
        ],
    )?];
    if let Some(url) = image_url {
        attachment_blocks.push(slack::image(url, CHART_ALT_TEXT));
    }
    let date = parse_event_time(&alarm.state_change_time)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|_| alarm.state_change_time.clone());
    attachment_blocks.push(slack::context(vec![
        slack::text_block(
            TextKind::PlainText,
            format!("Account ID: {}", alarm.aws_account_id),
            true,
        ),
        slack::text_block(TextKind::PlainText, format!("Date: {}", date), true),
    ]));

    Ok(SlackMessage {
        text: Some(format!(
            "{}\n*Alarm Reason:* <!channel>\n{}\n*Alarm Link:*\n{}",
            subject, alarm.new_state_reason, link
        )),
        blocks: vec![
            slack::header(subject),
            slack::text_section(
                TextKind::Mrkdwn,
                format!("*Alarm Reason:* <!channel>\n {}\n", alarm.new_state_reason),
            ),
            slack::text_section(TextKind::Mrkdwn, format!("*Alarm Link:*\n{}", link)),
        ],
        attachments: vec![Attachment {
            color: state_colour(&alarm.new_state_value).to_string(),
            blocks: attachment_blocks,
        }],
    })
}

pub fn state_colour(state: &str) -> &'static str {
    match state {
        "OK" => colours::OK,
        "ALARM" => colours::CRITICAL,
        "INSUFFICIENT_DATA" => colours::WARNING,
        _ => colours::NEUTRAL,
    }
}

/// Alarm payloads name regions by display name ("EU (Ireland)"); the API wants ids.
pub fn region_id(name: &str) -> &str {
    REGION_IDS
        .iter()
        .find(|(display, _)| *display == name)
        .map(|(_, id)| *id)
        .unwrap_or(name)
}

const REGION_IDS: &[(&str, &str)] = &[
    ("US East (Ohio)", "us-east-2"),
    ("US East (N. Virginia)", "us-east-1"),
    ("US West (N. California)", "us-west-1"),
    ("US West (Oregon)", "us-west-2"),
    ("Africa (Cape Town)", "af-south-1"),
    ("Asia Pacific (Hong Kong)", "ap-east-1"),
    ("Asia Pacific (Mumbai)", "ap-south-1"),
    ("Asia Pacific (Osaka)", "ap-northeast-3"),
    ("Asia Pacific (Seoul)", "ap-northeast-2"),
    ("Asia Pacific (Singapore)", "ap-southeast-1"),
    ("Asia Pacific (Sydney)", "ap-southeast-2"),
    ("Asia Pacific (Tokyo)", "ap-northeast-1"),
    ("Canada (Central)", "ca-central-1"),
    ("China (Beijing)", "cn-north-1"),
    ("China (Ningxia)", "cn-northwest-1"),
    ("Europe (Frankfurt)", "eu-central-1"),
    ("Europe (Ireland)", "eu-west-1"),
    ("EU (Ireland)", "eu-west-1"),
    ("Europe (London)", "eu-west-2"),
    ("Europe (Milan)", "eu-south-1"),
    ("Europe (Paris)", "eu-west-3"),
    ("Europe (Stockholm)", "eu-north-1"),
    ("South America (Sao Paulo)", "sa-east-1"),
];
