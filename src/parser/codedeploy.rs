// CodeDeploy deployment event -> Slack message

use crate::models::{Attachment, CodedeployEvent, SlackMessage};
use crate::slack::{self, SlackError, TextKind, colours};

pub fn codedeploy_message(event: &CodedeployEvent, subject: &str) -> Result<SlackMessage, SlackError> {
    let link = format!(
        "https://console.aws.amazon.com/codesuite/codedeploy/deployments/{}?region={}",
        event.deployment_id, event.region
    );
    let summary = format!(
        "*Application:* {}\n*Deployment Group:* {}",
        event.application_name, event.deployment_group_name
    );

    Ok(SlackMessage {
        text: Some(format!("{}\n{}\n*Deployment Link:*\n{}", subject, summary, link)),
        blocks: vec![
            slack::header(subject),
            slack::text_section(TextKind::Mrkdwn, summary),
            slack::text_section(TextKind::Mrkdwn, format!("*Deployment Link:*\n{}", link)),
        ],
        attachments: vec![Attachment {
            color: status_colour(&event.status).to_string(),
            blocks: vec![
                slack::field_section(
                    TextKind::Mrkdwn,
                    [
                        format!("*Status:*\n {}", event.status),
                        format!("*Region:*\n {}", event.region),
                    ],
                )?,
                slack::context(vec![
                    slack::text_block(
                        TextKind::PlainText,
                        format!("Account ID: {}", event.account_id),
                        true,
                    ),
                    slack::text_block(
                        TextKind::PlainText,
                        format!("Deployment ID: {}", event.deployment_id),
                        true,
                    ),
                ]),
            ],
        }],
    })
}

pub fn status_colour(status: &str) -> &'static str {
    match status {
        "SUCCEEDED" => colours::OK,
        "FAILED" => colours::CRITICAL,
        "STOPPED" => colours::WARNING,
        _ => colours::NEUTRAL,
    }
}
