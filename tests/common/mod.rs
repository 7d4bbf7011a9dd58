// Shared test helpers: fixtures, a canned metrics client, a fake Slack webhook

#![allow(dead_code)]

use alert_notifier::metrics_repo::{MetricQuery, MetricsClient, MetricsError};
use alert_notifier::models::RawDatapoint;
use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// CloudWatch alarm as delivered in an SNS message.
pub const ALARM_EVENT: &str = r#"{
    "AlarmName": "alb-2xx-count",
    "AlarmDescription": "Target 2XX responses dropped",
    "AWSAccountId": "123456789012",
    "NewStateValue": "ALARM",
    "NewStateReason": "Threshold Crossed: 1 datapoint [42.0 (28/07/21 05:07:00)] was less than the threshold (100.0).",
    "StateChangeTime": "2021-07-28T05:12:33.789+0000",
    "Region": "US East (N. Virginia)",
    "AlarmArn": "arn:aws:cloudwatch:us-east-1:123456789012:alarm:alb-2xx-count",
    "OldStateValue": "OK",
    "Trigger": {
        "MetricName": "HTTPCode_Target_2XX_Count",
        "Namespace": "AWS/ApplicationELB",
        "StatisticType": "Statistic",
        "Statistic": "AVERAGE",
        "Unit": null,
        "Dimensions": [
            { "value": "app/my-alb/0123456789abcdef", "name": "LoadBalancer" }
        ],
        "Period": 300,
        "EvaluationPeriods": 1,
        "ComparisonOperator": "LessThanThreshold",
        "Threshold": 100.0,
        "TreatMissingData": "",
        "EvaluateLowSampleCountPercentile": ""
    }
}"#;

pub const CODEDEPLOY_EVENT: &str = r#"{
    "region": "ap-south-1",
    "accountId": "123456789012",
    "eventTriggerName": "deploy-notifications",
    "applicationName": "MyApp",
    "deploymentId": "d-CLYPG9180",
    "deploymentGroupName": "sample-app",
    "createTime": "Wed Jul 28 05:12:33 UTC 2021",
    "completeTime": "",
    "status": "CREATED"
}"#;

pub fn ms(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap()
}

pub fn average_at(millis: i64, value: f64) -> RawDatapoint {
    RawDatapoint {
        average: Some(value),
        unit: Some("Seconds".into()),
        ..RawDatapoint::at(ms(millis))
    }
}

/// Returns canned datapoints and records every query it receives.
#[derive(Default)]
pub struct CannedMetrics {
    pub datapoints: Vec<RawDatapoint>,
    pub queries: Mutex<Vec<MetricQuery>>,
}

impl CannedMetrics {
    pub fn new(datapoints: Vec<RawDatapoint>) -> Self {
        Self {
            datapoints,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MetricsClient for CannedMetrics {
    async fn fetch_datapoints(&self, query: &MetricQuery) -> Result<Vec<RawDatapoint>, MetricsError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.datapoints.clone())
    }
}

/// Fails every request, like an unreachable metrics service.
pub struct FailingMetrics;

#[async_trait]
impl MetricsClient for FailingMetrics {
    async fn fetch_datapoints(&self, _query: &MetricQuery) -> Result<Vec<RawDatapoint>, MetricsError> {
        Err(MetricsError::Request("connection refused".into()))
    }
}

#[derive(Clone)]
struct HookState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

/// Local webhook on 127.0.0.1 answering `status` with `body`. Returns its URL and the posted payloads.
pub async fn spawn_webhook(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<serde_json::Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = HookState {
        status,
        body,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/hook", post(hook))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}/hook", addr), received)
}

async fn hook(
    State(state): State<HookState>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, &'static str) {
    state.received.lock().unwrap().push(payload);
    (state.status, state.body)
}

/// Local GET endpoint that counts its visits.
pub async fn spawn_visit_counter() -> (String, Arc<AtomicUsize>) {
    let visits = Arc::new(AtomicUsize::new(0));
    let counter = visits.clone();
    let app = Router::new().route(
        "/confirm",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                "confirmed"
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}/confirm", addr), visits)
}
