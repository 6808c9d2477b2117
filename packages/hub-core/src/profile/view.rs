//! Agent Profile View Model
//!
//! Pure transforms behind the five profile tabs. Nothing here fetches or
//! holds state.

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::types::AgentMetrics;

/// OAuth scopes listed on the integration tab
pub const INTEGRATION_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/cloud-language",
];

/// Status shown on the overview tab
pub const AGENT_STATUS: &str = "Active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Overview,
    Capabilities,
    Performance,
    Integration,
    Configuration,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 5] = [
        ProfileTab::Overview,
        ProfileTab::Capabilities,
        ProfileTab::Performance,
        ProfileTab::Integration,
        ProfileTab::Configuration,
    ];

    /// Selector token, as used in `--tab`
    pub fn key(&self) -> &'static str {
        match self {
            ProfileTab::Overview => "overview",
            ProfileTab::Capabilities => "capabilities",
            ProfileTab::Performance => "metrics",
            ProfileTab::Integration => "integration",
            ProfileTab::Configuration => "config",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProfileTab::Overview => "Overview",
            ProfileTab::Capabilities => "Capabilities",
            ProfileTab::Performance => "Performance",
            ProfileTab::Integration => "Integration",
            ProfileTab::Configuration => "Configuration",
        }
    }
}

impl std::fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for ProfileTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overview" => Ok(ProfileTab::Overview),
            "capabilities" => Ok(ProfileTab::Capabilities),
            "metrics" | "performance" => Ok(ProfileTab::Performance),
            "integration" => Ok(ProfileTab::Integration),
            "config" | "configuration" => Ok(ProfileTab::Configuration),
            other => Err(format!(
                "unknown tab {:?} (expected one of: overview, capabilities, metrics, integration, config)",
                other
            )),
        }
    }
}

/// Human label for an underscore-delimited capability token.
///
/// Every piece gets its first character uppercased and the rest kept as is,
/// so `"natural_language_processing"` becomes `"Natural Language Processing"`.
/// An empty token yields an empty label.
pub fn capability_label(token: &str) -> String {
    token
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: String,
    pub value: f64,
}

/// Pair timestamps with values by index. Extra entries on either side are dropped.
pub fn chart_series(timestamps: &[String], values: &[f64]) -> Vec<SeriesPoint> {
    timestamps
        .iter()
        .zip(values)
        .map(|(timestamp, value)| SeriesPoint {
            timestamp: timestamp.clone(),
            value: *value,
        })
        .collect()
}

/// The three charts on the performance tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    ResponseTime,
    Usage,
    ErrorRate,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::ResponseTime,
        MetricKind::Usage,
        MetricKind::ErrorRate,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::ResponseTime => "Response Time",
            MetricKind::Usage => "Usage",
            MetricKind::ErrorRate => "Error Rate",
        }
    }
}

impl AgentMetrics {
    pub fn series(&self, kind: MetricKind) -> Vec<SeriesPoint> {
        let values = &self.daily.values;
        let data = match kind {
            MetricKind::ResponseTime => &values.response_time,
            MetricKind::Usage => &values.usage,
            MetricKind::ErrorRate => &values.error_rate,
        };
        chart_series(&self.daily.timestamps, data)
    }
}

/// Model settings snapshot on the configuration tab
pub fn model_settings() -> Value {
    json!({
        "temperature": 0.7,
        "maxOutputTokens": 1024,
        "topP": 0.8,
        "topK": 40
    })
}

/// Resource allocation snapshot on the configuration tab
pub fn resource_allocation() -> Value {
    json!({
        "minReplicas": 1,
        "maxReplicas": 10,
        "accelerator": "GPU",
        "machineType": "n1-standard-4"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{DailyMetrics, MetricValues};

    #[test]
    fn test_capability_label() {
        assert_eq!(
            capability_label("natural_language_processing"),
            "Natural Language Processing"
        );
        assert_eq!(capability_label("ocr"), "Ocr");
        assert_eq!(capability_label("already_Capitalized"), "Already Capitalized");
        assert_eq!(capability_label(""), "");
    }

    #[test]
    fn test_capability_label_keeps_empty_pieces() {
        assert_eq!(capability_label("a__b"), "A  B");
        assert_eq!(capability_label("_lead"), " Lead");
    }

    #[test]
    fn test_chart_series_pairs_by_index() {
        let timestamps = vec!["t1".to_string(), "t2".to_string()];
        let series = chart_series(&timestamps, &[10.0, 20.0]);
        assert_eq!(
            series,
            vec![
                SeriesPoint {
                    timestamp: "t1".to_string(),
                    value: 10.0
                },
                SeriesPoint {
                    timestamp: "t2".to_string(),
                    value: 20.0
                },
            ]
        );
    }

    #[test]
    fn test_chart_series_short_values() {
        let timestamps = vec!["t1".to_string(), "t2".to_string(), "t3".to_string()];
        assert_eq!(chart_series(&timestamps, &[1.0]).len(), 1);
        assert!(chart_series(&[], &[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_metrics_series_kind() {
        let metrics = AgentMetrics {
            daily: DailyMetrics {
                timestamps: vec!["t1".to_string()],
                values: MetricValues {
                    response_time: vec![120.0],
                    usage: vec![3.0],
                    error_rate: vec![0.02],
                },
            },
        };
        assert_eq!(metrics.series(MetricKind::Usage)[0].value, 3.0);
        assert_eq!(metrics.series(MetricKind::ErrorRate)[0].value, 0.02);
    }

    #[test]
    fn test_tab_tokens() {
        for tab in ProfileTab::ALL {
            assert_eq!(tab.key().parse::<ProfileTab>().unwrap(), tab);
        }
        assert_eq!(
            "Performance".parse::<ProfileTab>().unwrap(),
            ProfileTab::Performance
        );
        assert!("logs".parse::<ProfileTab>().is_err());
        assert_eq!(ProfileTab::default(), ProfileTab::Overview);
    }

    #[test]
    fn test_config_snapshots() {
        assert_eq!(model_settings()["maxOutputTokens"], 1024);
        assert_eq!(resource_allocation()["machineType"], "n1-standard-4");
    }
}
