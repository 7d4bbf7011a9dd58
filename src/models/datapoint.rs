// Raw metric datapoints as returned by the metrics service, and the statistic tag

use chrono::{DateTime, Utc};
use std::fmt;

/// One raw reading. Only the field matching the queried statistic is usually set.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDatapoint {
    pub timestamp: DateTime<Utc>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub sample_count: Option<f64>,
    pub sum: Option<f64>,
    pub unit: Option<String>,
}

impl RawDatapoint {
    /// Datapoint with no statistic fields set.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            average: None,
            maximum: None,
            minimum: None,
            sample_count: None,
            sum: None,
            unit: None,
        }
    }

    /// Reads the field named by `statistic`. Unknown statistics read nothing.
    pub fn value_of(&self, statistic: &Statistic) -> Option<f64> {
        match statistic {
            Statistic::Average => self.average,
            Statistic::Maximum => self.maximum,
            Statistic::Minimum => self.minimum,
            Statistic::SampleCount => self.sample_count,
            Statistic::Sum => self.sum,
            Statistic::Other(_) => None,
        }
    }
}

/// Reduction rule for a slot. Unrecognised names are kept, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statistic {
    Average,
    Maximum,
    Minimum,
    SampleCount,
    Sum,
    Other(String),
}

impl Statistic {
    /// Exact, case-sensitive match on the metrics service names.
    pub fn parse(name: &str) -> Self {
        match name {
            "Average" => Statistic::Average,
            "Maximum" => Statistic::Maximum,
            "Minimum" => Statistic::Minimum,
            "SampleCount" => Statistic::SampleCount,
            "Sum" => Statistic::Sum,
            other => Statistic::Other(other.to_string()),
        }
    }

    /// Alarm triggers carry upper-case names ("AVERAGE"). Only the first letter is
    /// kept upper-case, so "SAMPLE_COUNT" becomes the unknown "Sample_count".
    pub fn from_trigger(name: &str) -> Self {
        let mut chars = name.chars();
        let normalized = match chars.next() {
            Some(first) => {
                let mut s: String = first.to_uppercase().collect();
                s.push_str(&chars.as_str().to_lowercase());
                s
            }
            None => String::new(),
        };
        Self::parse(&normalized)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Statistic::Average => "Average",
            Statistic::Maximum => "Maximum",
            Statistic::Minimum => "Minimum",
            Statistic::SampleCount => "SampleCount",
            Statistic::Sum => "Sum",
            Statistic::Other(name) => name,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
