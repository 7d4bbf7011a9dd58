// Event matching and Slack message construction for alarms and deployments

mod common;

use alert_notifier::chart::ChartService;
use alert_notifier::config::ChartConfig;
use alert_notifier::models::{Block, CloudwatchAlarm, TextObject};
use alert_notifier::parser::cloudwatch::{
    CHART_ALT_TEXT, alarm_message, cloudwatch_parse, region_id, state_colour,
};
use alert_notifier::parser::codedeploy::{codedeploy_message, status_colour};
use alert_notifier::parser::{AlertEvent, ParseError, match_event};
use alert_notifier::slack::colours;
use common::{ALARM_EVENT, CODEDEPLOY_EVENT, CannedMetrics, FailingMetrics, average_at};
use serde_json::json;
use std::sync::Arc;

fn alarm() -> CloudwatchAlarm {
    serde_json::from_str(ALARM_EVENT).unwrap()
}

#[test]
fn matches_cloudwatch_alarm() {
    let event = match_event(ALARM_EVENT).unwrap();
    let AlertEvent::CloudwatchAlarm(alarm) = event else {
        panic!("expected alarm");
    };
    assert_eq!(alarm.alarm_name, "alb-2xx-count");
    assert_eq!(alarm.trigger.threshold, 100.0);
    assert_eq!(alarm.trigger.period, 300);
    assert_eq!(alarm.trigger.unit, None);
}

#[test]
fn matches_codedeploy_event() {
    let event = match_event(CODEDEPLOY_EVENT).unwrap();
    let AlertEvent::Codedeploy(deploy) = event else {
        panic!("expected deployment");
    };
    assert_eq!(deploy.deployment_id, "d-CLYPG9180");
    assert_eq!(deploy.application_name, "MyApp");
}

#[test]
fn unrecognised_events_are_rejected() {
    let err = match_event("{}").unwrap_err();
    assert!(matches!(err, ParseError::Unrecognised));
    assert_eq!(err.to_string(), "Unable to process event as it is not recognised");

    // empty description is not an alarm
    let blank = json!({ "AlarmName": "x", "AlarmDescription": "" }).to_string();
    assert!(matches!(match_event(&blank), Err(ParseError::Unrecognised)));

    assert!(matches!(match_event("not json"), Err(ParseError::Malformed(_))));
}

#[test]
fn alarm_message_with_chart() {
    let alarm = alarm();
    let message = alarm_message("Jest Test", "us-east-1", &alarm, Some("https://test.com/chart")).unwrap();
    let value = serde_json::to_value(&message).unwrap();

    let link = "https://console.aws.amazon.com/cloudwatch/home?region=us-east-1#alarm:name=alb-2xx-count";
    assert_eq!(
        value["text"],
        format!(
            "Jest Test\n*Alarm Reason:* <!channel>\n{}\n*Alarm Link:*\n{}",
            alarm.new_state_reason, link
        )
    );
    assert_eq!(
        value["blocks"][0],
        json!({ "type": "header", "text": { "type": "plain_text", "text": "Jest Test", "emoji": true } })
    );
    assert_eq!(value["blocks"][2]["text"]["type"], "mrkdwn");
    assert_eq!(value["blocks"][2]["text"]["text"], format!("*Alarm Link:*\n{}", link));

    let attachment = &value["attachments"][0];
    assert_eq!(attachment["color"], colours::CRITICAL);
    assert_eq!(
        attachment["blocks"][0]["fields"][0]["text"],
        "*State Change:*\n OK -> ALARM"
    );
    assert_eq!(
        attachment["blocks"][1],
        json!({ "type": "image", "image_url": "https://test.com/chart", "alt_text": CHART_ALT_TEXT })
    );
    assert_eq!(attachment["blocks"][2]["type"], "context");
    assert_eq!(
        attachment["blocks"][2]["elements"][1]["text"],
        "Date: 2021-07-28T05:12:33.789Z"
    );
}

#[test]
fn alarm_message_without_chart_has_no_image() {
    let mut alarm = alarm();
    alarm.new_state_value = "OK".into();
    let message = alarm_message("Jest Test", "us-east-1", &alarm, None).unwrap();
    let attachment = &message.attachments[0];
    assert_eq!(attachment.color, colours::OK);
    assert_eq!(attachment.blocks.len(), 2);
    assert!(!attachment.blocks.iter().any(|b| matches!(b, Block::Image { .. })));
    let Block::Context { elements } = &attachment.blocks[1] else {
        panic!("expected context block");
    };
    assert_eq!(elements[0].text(), "Account ID: 123456789012");
}

#[tokio::test]
async fn cloudwatch_parse_embeds_chart_url() {
    let metrics = Arc::new(CannedMetrics::new(vec![average_at(0, 1.0)]));
    let charts = ChartService::new(metrics.clone(), ChartConfig::default());
    let message = cloudwatch_parse(&alarm(), "subject", &charts).await.unwrap();

    let image = message.attachments[0]
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::Image { image_url, .. } => Some(image_url.clone()),
            _ => None,
        })
        .expect("image block");
    assert!(image.starts_with("https://chart.googleapis.com/chart?cht=ls"));
    // display name resolved to a region id for the metrics query
    assert_eq!(metrics.queries.lock().unwrap()[0].region, "us-east-1");
}

#[tokio::test]
async fn cloudwatch_parse_falls_back_without_chart() {
    let charts = ChartService::new(Arc::new(FailingMetrics), ChartConfig::default());
    let message = cloudwatch_parse(&alarm(), "subject", &charts).await.unwrap();
    assert_eq!(message.attachments[0].blocks.len(), 2);

    let empty = ChartService::new(Arc::new(CannedMetrics::new(vec![])), ChartConfig::default());
    let message = cloudwatch_parse(&alarm(), "subject", &empty).await.unwrap();
    assert_eq!(message.attachments[0].blocks.len(), 2);
}

#[test]
fn state_and_status_colours() {
    assert_eq!(state_colour("OK"), colours::OK);
    assert_eq!(state_colour("ALARM"), colours::CRITICAL);
    assert_eq!(state_colour("INSUFFICIENT_DATA"), colours::WARNING);
    assert_eq!(state_colour("SOMETHING_ELSE"), colours::NEUTRAL);

    assert_eq!(status_colour("SUCCEEDED"), colours::OK);
    assert_eq!(status_colour("FAILED"), colours::CRITICAL);
    assert_eq!(status_colour("STOPPED"), colours::WARNING);
    assert_eq!(status_colour("CREATED"), colours::NEUTRAL);
}

#[test]
fn region_names_map_to_ids() {
    assert_eq!(region_id("US East (N. Virginia)"), "us-east-1");
    assert_eq!(region_id("Asia Pacific (Sydney)"), "ap-southeast-2");
    assert_eq!(region_id("eu-west-1"), "eu-west-1");
}

#[test]
fn codedeploy_message_layout() {
    let AlertEvent::Codedeploy(event) = match_event(CODEDEPLOY_EVENT).unwrap() else {
        panic!("expected deployment");
    };
    let subject = "CREATED: AWS CodeDeploy d-CLYPG9180 in ap-south-1 to MyApp-sample-app";
    let message = codedeploy_message(&event, subject).unwrap();

    assert_eq!(message.blocks.len(), 3);
    let Block::Header { text } = &message.blocks[0] else {
        panic!("expected header");
    };
    assert_eq!(
        text,
        &TextObject::PlainText {
            text: subject.into(),
            emoji: true
        }
    );
    let Block::Section { text: Some(summary), .. } = &message.blocks[1] else {
        panic!("expected summary section");
    };
    assert_eq!(summary.text(), "*Application:* MyApp\n*Deployment Group:* sample-app");

    let attachment = &message.attachments[0];
    assert_eq!(attachment.color, colours::NEUTRAL);
    let Block::Context { elements } = &attachment.blocks[1] else {
        panic!("expected context");
    };
    assert_eq!(elements[1].text(), "Deployment ID: d-CLYPG9180");
    assert!(
        message
            .text
            .as_deref()
            .unwrap()
            .contains("codedeploy/deployments/d-CLYPG9180?region=ap-south-1")
    );
}
