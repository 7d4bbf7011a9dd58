// POST /sns: SNS HTTP(S) subscription endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use bytes::Bytes;
use reqwest::Url;
use tracing::{info, warn};

use super::AppState;
use crate::models::{SnsEnvelope, SnsMessageType};

/// Used when the publisher set no subject.
const DEFAULT_SUBJECT: &str = "AWS Notification";

/// SNS sends `text/plain` JSON, so the body is parsed by hand.
/// Processing failures still answer 200 so SNS does not redeliver.
pub(super) async fn sns_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let envelope: SnsEnvelope = match serde_json::from_slice(&body) {
        Ok(e) => e,
        Err(e) => {
            warn!(error = %e, "rejecting malformed SNS envelope");
            return (StatusCode::BAD_REQUEST, "malformed SNS envelope");
        }
    };

    match envelope.message_type {
        SnsMessageType::SubscriptionConfirmation => {
            let Some(url) = envelope.subscribe_url.as_deref() else {
                return (StatusCode::BAD_REQUEST, "missing SubscribeURL");
            };
            let Some(url) = Url::parse(url).ok().filter(is_sns_endpoint) else {
                warn!(url, "refusing SubscribeURL outside SNS");
                return (StatusCode::BAD_REQUEST, "untrusted SubscribeURL");
            };
            match state.http.get(url).send().await.and_then(|r| r.error_for_status()) {
                Ok(_) => info!(topic = ?envelope.topic_arn, "SNS subscription confirmed"),
                Err(e) => warn!(error = %e, "SNS subscription confirmation failed"),
            }
        }
        SnsMessageType::Notification => {
            let subject = envelope
                .subject
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SUBJECT);
            let _ = state.dispatcher.handle(&envelope.message, subject).await;
        }
        other => info!(message_type = ?other, "ignoring SNS message"),
    }
    (StatusCode::OK, "OK")
}

/// `https://sns.<region>.amazonaws.com[.cn]/...` with no credentials or custom port.
fn is_sns_endpoint(url: &Url) -> bool {
    if url.scheme() != "https" || url.port().is_some() || !url.username().is_empty() {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    let Some(rest) = host.strip_prefix("sns.") else {
        return false;
    };
    let region = rest
        .strip_suffix(".amazonaws.com")
        .or_else(|| rest.strip_suffix(".amazonaws.com.cn"));
    region.is_some_and(|r| {
        !r.is_empty() && r.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    })
}
