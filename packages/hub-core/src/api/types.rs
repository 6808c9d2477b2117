//! Wire types
//!
//! Shapes returned and accepted by the `/api/agent-hub` endpoints. Catalog
//! records are camelCase on the wire; agent records are snake_case.

use serde::{Deserialize, Serialize};

/// A deployable agent blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub base_agent: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub organization: String,
}

impl Customer {
    /// Label used in the customer picker
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.organization)
    }
}

/// Body of `POST /api/agent-hub/deploy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    pub template_id: String,
    pub customer_id: String,
    pub deployment_name: String,
}

/// Three parallel numeric series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricValues {
    #[serde(default)]
    pub response_time: Vec<f64>,
    #[serde(default)]
    pub usage: Vec<f64>,
    #[serde(default)]
    pub error_rate: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub endpoint_id: String,
    pub region: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    pub specialization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricValues>,
}

impl AgentProfile {
    /// Version badge text
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("Latest")
    }

    /// Version as shown on the overview tab
    pub fn release_label(&self) -> &str {
        self.version.as_deref().unwrap_or("Latest Release")
    }

    /// Prediction endpoint URL for this agent
    pub fn endpoint_url(&self) -> String {
        format!(
            "https://{region}-aiplatform.googleapis.com/v1/projects/api-for-warp-drive/locations/{region}/endpoints/{endpoint}",
            region = self.region,
            endpoint = self.endpoint_id,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    #[serde(default)]
    pub timestamps: Vec<String>,
    #[serde(default)]
    pub values: MetricValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub daily: DailyMetrics,
}

impl AgentMetrics {
    /// True when every series has one value per timestamp
    pub fn is_aligned(&self) -> bool {
        let len = self.daily.timestamps.len();
        let values = &self.daily.values;
        values.response_time.len() == len
            && values.usage.len() == len
            && values.error_rate.len() == len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_uses_camel_case() {
        let json = r#"{
            "id": "tpl-1",
            "name": "Support Bot",
            "baseAgent": "gemini-pro",
            "description": "Answers tickets"
        }"#;

        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.base_agent, "gemini-pro");
    }

    #[test]
    fn test_deployment_request_body() {
        let request = DeploymentRequest {
            template_id: "tpl-1".to_string(),
            customer_id: "cus-9".to_string(),
            deployment_name: "acme-support".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "templateId": "tpl-1",
                "customerId": "cus-9",
                "deploymentName": "acme-support"
            })
        );
    }

    #[test]
    fn test_profile_optional_fields() {
        let json = r#"{
            "name": "Claims Agent",
            "endpoint_id": "1234567890",
            "region": "us-central1",
            "capabilities": ["document_parsing"],
            "specialization": "Insurance"
        }"#;

        let profile: AgentProfile = serde_json::from_str(json).unwrap();
        assert!(profile.version.is_none());
        assert!(profile.metrics.is_none());
        assert_eq!(profile.version_label(), "Latest");
        assert_eq!(profile.release_label(), "Latest Release");
        assert_eq!(
            profile.endpoint_url(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/api-for-warp-drive/locations/us-central1/endpoints/1234567890"
        );
    }

    #[test]
    fn test_metrics_alignment() {
        let json = r#"{
            "daily": {
                "timestamps": ["t1", "t2"],
                "values": {
                    "response_time": [10, 20],
                    "usage": [1, 2],
                    "error_rate": [0.1]
                }
            }
        }"#;

        let metrics: AgentMetrics = serde_json::from_str(json).unwrap();
        assert!(!metrics.is_aligned());
        assert_eq!(metrics.daily.values.response_time, vec![10.0, 20.0]);
    }
}
