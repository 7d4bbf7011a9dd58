use serde::Deserialize;

pub const DEFAULT_CHART_BASE_URL: &str = "https://chart.googleapis.com/chart";
/// CloudWatch keeps statistics for 15 months.
pub const MAX_LOOKBACK_SECS: u64 = 455 * 24 * 60 * 60;
pub const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub aws: AwsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Chart geometry and the metrics window it covers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
    /// Number of time slots (one point per slot).
    pub samples: usize,
    /// Horizontal pixels reserved per axis label.
    pub label_spacing_px: u32,
    /// Statistics period requested from the metrics service.
    pub period_secs: u32,
    /// How far back from the alarm time the chart starts.
    pub lookback_secs: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHART_BASE_URL.into(),
            width: 500,
            height: 220,
            samples: 144,
            label_spacing_px: 50,
            period_secs: 60,
            lookback_secs: 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackConfig {
    /// Incoming webhook. Falls back to SLACK_WEBHOOK_INCIDENTS.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    /// Role assumed in the alarm's account before reading metrics. Falls back to ASSUME_ROLE_NAME.
    #[serde(default)]
    pub assume_role_name: Option<String>,
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

fn default_session_name() -> String {
    "alert-lambda".into()
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            assume_role_name: None,
            session_name: default_session_name(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        let mut config = Self::load_from_str(&s)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Fills unset secrets from the environment. File values win.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.slack.webhook_url.is_none() {
            self.slack.webhook_url = lookup("SLACK_WEBHOOK_INCIDENTS").filter(|s| !s.is_empty());
        }
        if self.aws.assume_role_name.is_none() {
            self.aws.assume_role_name = lookup("ASSUME_ROLE_NAME").filter(|s| !s.is_empty());
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.chart.base_url.is_empty(),
            "chart.base_url must be non-empty"
        );
        anyhow::ensure!(
            self.chart.width > 0,
            "chart.width must be > 0, got {}",
            self.chart.width
        );
        anyhow::ensure!(
            self.chart.height > 0,
            "chart.height must be > 0, got {}",
            self.chart.height
        );
        anyhow::ensure!(
            self.chart.label_spacing_px > 0,
            "chart.label_spacing_px must be > 0, got {}",
            self.chart.label_spacing_px
        );
        anyhow::ensure!(
            self.chart.period_secs > 0,
            "chart.period_secs must be > 0, got {}",
            self.chart.period_secs
        );
        anyhow::ensure!(
            self.chart.lookback_secs > 0 && self.chart.lookback_secs <= MAX_LOOKBACK_SECS,
            "chart.lookback_secs must be between 1 and {}, got {}",
            MAX_LOOKBACK_SECS,
            self.chart.lookback_secs
        );
        anyhow::ensure!(
            u64::from(self.chart.period_secs) <= self.chart.lookback_secs,
            "chart.period_secs must not exceed chart.lookback_secs, got {}",
            self.chart.period_secs
        );
        anyhow::ensure!(
            self.chart.samples <= MAX_SAMPLES,
            "chart.samples must be at most {}, got {}",
            MAX_SAMPLES,
            self.chart.samples
        );
        // Rounding may drop one slot; the label stride must still be >= 1.
        let labels = (self.chart.width as f64 / self.chart.label_spacing_px as f64).ceil() as usize;
        anyhow::ensure!(
            self.chart.samples > labels,
            "chart.samples must exceed the {} axis labels that fit chart.width, got {}",
            labels,
            self.chart.samples
        );
        anyhow::ensure!(
            !self.aws.session_name.is_empty(),
            "aws.session_name must be non-empty"
        );
        Ok(())
    }
}
