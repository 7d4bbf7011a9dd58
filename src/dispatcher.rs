// Routes one SNS message to its parser and posts the resulting Slack message.

use tracing::{info, instrument};

use crate::chart::ChartService;
use crate::parser::cloudwatch::cloudwatch_parse;
use crate::parser::codedeploy::codedeploy_message;
use crate::parser::{AlertEvent, match_event};
use crate::slack::SlackClient;

pub struct Dispatcher {
    charts: ChartService,
    slack: SlackClient,
}

impl Dispatcher {
    pub fn new(charts: ChartService, slack: SlackClient) -> Self {
        Self { charts, slack }
    }

    /// Returns the webhook's HTTP status. Errors are logged here and returned.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &str, subject: &str) -> anyhow::Result<u16> {
        let result = self.process(message, subject).await;
        if let Err(e) = &result {
            info!(error = %e, "Could not process event");
        }
        result
    }

    async fn process(&self, message: &str, subject: &str) -> anyhow::Result<u16> {
        let slack_message = match match_event(message)? {
            AlertEvent::CloudwatchAlarm(alarm) => cloudwatch_parse(&alarm, subject, &self.charts).await?,
            AlertEvent::Codedeploy(event) => codedeploy_message(&event, subject)?,
        };
        Ok(self.slack.post_message(&slack_message, None).await?)
    }
}
