//! API Client
//!
//! `AgentHubApi` is the data-fetching boundary used by the wizard and the
//! profile loader. `HttpClient` implements it over reqwest.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::api::types::{AgentMetrics, AgentProfile, Customer, DeploymentRequest, Template};
use crate::error::{HubError, Result};

/// Path prefix shared by every Agent Hub endpoint
pub const API_PREFIX: [&str; 2] = ["api", "agent-hub"];

/// Operations offered by the Agent Hub backend
#[async_trait]
pub trait AgentHubApi: Send + Sync {
    /// `GET /api/agent-hub/templates`
    async fn list_templates(&self) -> Result<Vec<Template>>;

    /// `GET /api/agent-hub/customers`
    async fn list_customers(&self) -> Result<Vec<Customer>>;

    /// `POST /api/agent-hub/deploy`; any 2xx counts as success
    async fn deploy(&self, request: &DeploymentRequest) -> Result<()>;

    /// `GET /api/agent-hub/agents/{agentId}`
    async fn get_agent(&self, agent_id: &str) -> Result<AgentProfile>;

    /// `GET /api/agent-hub/agents/{agentId}/metrics`; `None` for a null body
    async fn get_metrics(&self, agent_id: &str) -> Result<Option<AgentMetrics>>;
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client for the given base URL (scheme, host and optional path prefix)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| HubError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(HubError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|source| HubError::Request {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL; each segment is percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HubError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| HubError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|source| HubError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl AgentHubApi for HttpClient {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        self.get_json(self.endpoint(&["templates"])?).await
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.get_json(self.endpoint(&["customers"])?).await
    }

    async fn deploy(&self, request: &DeploymentRequest) -> Result<()> {
        let url = self.endpoint(&["deploy"])?;
        debug!(url = %url, template_id = %request.template_id, customer_id = %request.customer_id, "POST");

        let response = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|source| HubError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    async fn get_agent(&self, agent_id: &str) -> Result<AgentProfile> {
        self.get_json(self.endpoint(&["agents", agent_id])?).await
    }

    async fn get_metrics(&self, agent_id: &str) -> Result<Option<AgentMetrics>> {
        self.get_json(self.endpoint(&["agents", agent_id, "metrics"])?)
            .await
    }
}
