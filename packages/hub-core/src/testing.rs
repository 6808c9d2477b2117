//! In-memory `AgentHubApi` used by unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::api::client::AgentHubApi;
use crate::api::types::{
    AgentMetrics, AgentProfile, Customer, DailyMetrics, DeploymentRequest, MetricValues, Template,
};
use crate::error::{HubError, Result};
use crate::notify::{Notification, Notifier};

pub struct FakeHub {
    templates: Vec<Template>,
    customers: Vec<Customer>,
    fail_customers: bool,
    deploy_status: Option<u16>,
    deploys: Mutex<Vec<DeploymentRequest>>,
    missing_agents: Vec<String>,
    /// Agent fetches for these ids wait until the gate is opened
    gates: HashMap<String, Arc<Notify>>,
}

impl FakeHub {
    pub fn new() -> Self {
        Self {
            templates: vec![
                Template {
                    id: "tpl-support".to_string(),
                    name: "Support Bot".to_string(),
                    base_agent: "gemini-pro".to_string(),
                    description: "Answers customer tickets".to_string(),
                },
                Template {
                    id: "tpl-claims".to_string(),
                    name: "Claims Reviewer".to_string(),
                    base_agent: "gemini-pro".to_string(),
                    description: "Reviews insurance claims".to_string(),
                },
            ],
            customers: vec![Customer {
                id: "cus-acme".to_string(),
                name: "Ada".to_string(),
                organization: "Acme".to_string(),
            }],
            fail_customers: false,
            deploy_status: None,
            deploys: Mutex::new(Vec::new()),
            missing_agents: Vec::new(),
            gates: HashMap::new(),
        }
    }

    pub fn failing_customers(mut self) -> Self {
        self.fail_customers = true;
        self
    }

    pub fn failing_deploy(mut self, status: u16) -> Self {
        self.deploy_status = Some(status);
        self
    }

    pub fn missing_agent(mut self, agent_id: &str) -> Self {
        self.missing_agents.push(agent_id.to_string());
        self
    }

    /// Hold fetches for `agent_id` until the returned handle is notified
    pub fn gated(mut self, agent_id: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(agent_id.to_string(), gate.clone());
        (self, gate)
    }

    pub fn deploy_requests(&self) -> Vec<DeploymentRequest> {
        self.deploys.lock().clone()
    }

    pub fn profile(agent_id: &str) -> AgentProfile {
        AgentProfile {
            name: format!("Agent {}", agent_id),
            endpoint_id: format!("endpoint-{}", agent_id),
            region: "us-central1".to_string(),
            capabilities: vec!["natural_language_processing".to_string()],
            specialization: "Support".to_string(),
            version: None,
            metrics: None,
        }
    }

    pub fn metrics() -> AgentMetrics {
        AgentMetrics {
            daily: DailyMetrics {
                timestamps: vec!["t1".to_string(), "t2".to_string()],
                values: MetricValues {
                    response_time: vec![10.0, 20.0],
                    usage: vec![5.0, 7.0],
                    error_rate: vec![0.0, 0.5],
                },
            },
        }
    }

    fn not_found(path: &str) -> HubError {
        HubError::Status {
            url: path.to_string(),
            status: 404,
        }
    }
}

#[async_trait]
impl AgentHubApi for FakeHub {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        Ok(self.templates.clone())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        if self.fail_customers {
            return Err(HubError::Status {
                url: "/api/agent-hub/customers".to_string(),
                status: 503,
            });
        }
        Ok(self.customers.clone())
    }

    async fn deploy(&self, request: &DeploymentRequest) -> Result<()> {
        self.deploys.lock().push(request.clone());
        match self.deploy_status {
            Some(status) => Err(HubError::Status {
                url: "/api/agent-hub/deploy".to_string(),
                status,
            }),
            None => Ok(()),
        }
    }

    async fn get_agent(&self, agent_id: &str) -> Result<AgentProfile> {
        if let Some(gate) = self.gates.get(agent_id) {
            gate.notified().await;
        }
        if self.missing_agents.iter().any(|id| id == agent_id) {
            return Err(Self::not_found(agent_id));
        }
        Ok(Self::profile(agent_id))
    }

    async fn get_metrics(&self, agent_id: &str) -> Result<Option<AgentMetrics>> {
        if self.missing_agents.iter().any(|id| id == agent_id) {
            return Err(Self::not_found(agent_id));
        }
        Ok(Some(Self::metrics()))
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn count_errors(&self) -> usize {
        self.seen.lock().iter().filter(|n| n.is_error()).count()
    }

    pub fn count_successes(&self) -> usize {
        self.seen.lock().iter().filter(|n| !n.is_error()).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}

/// Base URL of a local port nothing listens on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
