// Slack: Block Kit builders and the incoming-webhook client.

use tracing::{info, instrument};

use crate::config::SlackConfig;
use crate::models::{Block, SlackMessage, TextObject};

/// Side-bar colours for attachments.
pub mod colours {
    pub const CRITICAL: &str = "#FF324D";
    pub const WARNING: &str = "#FFD602";
    pub const OK: &str = "#8CC800";
    pub const NEUTRAL: &str = "#A8A8A8";
}

/// Slack rejects section blocks with more fields than this.
pub const MAX_SECTION_FIELDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("Slack webhook endpoint not defined")]
    WebhookNotDefined,
    #[error("Maximum number of fields is 10")]
    TooManyFields,
    #[error("Slack API reports bad request [HTTP:{status}] {reason}: {body}")]
    BadRequest {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("Slack API error [HTTP:{status}]: {body}")]
    Api { status: u16, body: String },
    #[error("Slack request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub fn text_block(kind: TextKind, text: impl Into<String>, emoji: bool) -> TextObject {
    match kind {
        TextKind::PlainText => TextObject::PlainText {
            text: text.into(),
            emoji,
        },
        TextKind::Mrkdwn => TextObject::Mrkdwn { text: text.into() },
    }
}

pub fn header(text: impl Into<String>) -> Block {
    Block::Header {
        text: text_block(TextKind::PlainText, text, true),
    }
}

pub fn text_section(kind: TextKind, text: impl Into<String>) -> Block {
    Block::Section {
        text: Some(text_block(kind, text, true)),
        fields: None,
    }
}

pub fn field_section<S: Into<String>>(
    kind: TextKind,
    texts: impl IntoIterator<Item = S>,
) -> Result<Block, SlackError> {
    let fields: Vec<TextObject> = texts
        .into_iter()
        .map(|t| text_block(kind, t, true))
        .collect();
    if fields.len() > MAX_SECTION_FIELDS {
        return Err(SlackError::TooManyFields);
    }
    Ok(Block::Section {
        text: None,
        fields: Some(fields),
    })
}

pub fn image(image_url: impl Into<String>, alt_text: impl Into<String>) -> Block {
    Block::Image {
        image_url: image_url.into(),
        alt_text: alt_text.into(),
    }
}

pub fn context(elements: Vec<TextObject>) -> Block {
    Block::Context { elements }
}

/// Posts messages to an incoming webhook.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    webhook_url: Option<String>,
}

impl SlackClient {
    pub fn new(config: &SlackConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url: config.webhook_url.clone(),
        }
    }

    /// Sends `message` to `alternative_url`, or to the configured webhook. Returns the HTTP status.
    #[instrument(skip(self, message), fields(client = "slack", operation = "post_message"))]
    pub async fn post_message(
        &self,
        message: &SlackMessage,
        alternative_url: Option<&str>,
    ) -> Result<u16, SlackError> {
        let url = alternative_url
            .or(self.webhook_url.as_deref())
            .filter(|u| !u.is_empty())
            .ok_or(SlackError::WebhookNotDefined)?;

        let response = self.http.post(url).json(message).send().await?;
        let status = response.status();
        if status.is_success() {
            info!("Message posted successfully.");
            return Ok(status.as_u16());
        }
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            return Err(SlackError::BadRequest {
                status: status.as_u16(),
                reason,
                body,
            });
        }
        Err(SlackError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
