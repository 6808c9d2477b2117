//! Deployment Wizard State Machine
//!
//! Three steps: pick a template, pick a customer, name and confirm the
//! deployment. Each state carries only the data that is valid in it, so a
//! deployment name cannot exist before both selections do.

use tracing::{info, warn};

use crate::api::client::AgentHubApi;
use crate::api::types::{Customer, DeploymentRequest, Template};
use crate::error::{HubError, Result, WizardError};
use crate::notify::{Notification, Notifier, DEPLOY_FAILED, DEPLOY_SUCCEEDED};

pub const TOTAL_STEPS: u8 = 3;

/// Outcome of a background fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    /// Not fetched yet, or in flight
    Pending,
    Ready(T),
    /// Fetch failed; the reason is for logs, not for display
    Failed(String),
}

impl<T> Load<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Load::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Load::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    SelectTemplate,
    SelectCustomer {
        template_id: String,
    },
    ConfirmDeploy {
        template_id: String,
        customer_id: String,
        deployment_name: String,
    },
    /// Terminal; `reset` starts a new deployment
    Deployed { request: DeploymentRequest },
}

impl WizardState {
    /// 1-based step number
    pub fn step(&self) -> u8 {
        match self {
            WizardState::SelectTemplate => 1,
            WizardState::SelectCustomer { .. } => 2,
            WizardState::ConfirmDeploy { .. } | WizardState::Deployed { .. } => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WizardState::SelectTemplate => "SelectTemplate",
            WizardState::SelectCustomer { .. } => "SelectCustomer",
            WizardState::ConfirmDeploy { .. } => "ConfirmDeploy",
            WizardState::Deployed { .. } => "Deployed",
        }
    }

    pub fn template_id(&self) -> Option<&str> {
        match self {
            WizardState::SelectTemplate => None,
            WizardState::SelectCustomer { template_id }
            | WizardState::ConfirmDeploy { template_id, .. } => Some(template_id),
            WizardState::Deployed { request } => Some(&request.template_id),
        }
    }

    pub fn customer_id(&self) -> Option<&str> {
        match self {
            WizardState::ConfirmDeploy { customer_id, .. } => Some(customer_id),
            WizardState::Deployed { request } => Some(&request.customer_id),
            _ => None,
        }
    }

    pub fn deployment_name(&self) -> Option<&str> {
        match self {
            WizardState::ConfirmDeploy {
                deployment_name, ..
            } => Some(deployment_name),
            WizardState::Deployed { request } => Some(&request.deployment_name),
            _ => None,
        }
    }

    fn wrong_step(&self) -> WizardError {
        WizardError::WrongStep {
            step: self.step(),
            state: self.name(),
        }
    }
}

impl std::fmt::Display for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug)]
pub struct DeploymentWizard {
    state: WizardState,
    templates: Load<Vec<Template>>,
    customers: Load<Vec<Customer>>,
    busy: bool,
}

impl DeploymentWizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::SelectTemplate,
            templates: Load::Pending,
            customers: Load::Pending,
            busy: false,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> u8 {
        self.state.step()
    }

    /// Progress bar value in percent
    pub fn progress_percent(&self) -> u8 {
        match self.state {
            WizardState::Deployed { .. } => 100,
            _ => (u16::from(self.step()) * 100 / u16::from(TOTAL_STEPS)) as u8,
        }
    }

    pub fn templates(&self) -> &Load<Vec<Template>> {
        &self.templates
    }

    pub fn customers(&self) -> &Load<Vec<Customer>> {
        &self.customers
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The template picked in step 1, if the catalog still has it
    pub fn selected_template(&self) -> Option<&Template> {
        let id = self.state.template_id()?;
        self.templates.ready()?.iter().find(|t| t.id == id)
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        let id = self.state.customer_id()?;
        self.customers.ready()?.iter().find(|c| c.id == id)
    }

    /// Fetch templates and customers concurrently. Both lists succeed or
    /// both are marked failed.
    pub async fn load_catalog(&mut self, api: &dyn AgentHubApi) -> Result<()> {
        self.templates = Load::Pending;
        self.customers = Load::Pending;

        match tokio::try_join!(api.list_templates(), api.list_customers()) {
            Ok((templates, customers)) => {
                info!(
                    templates = templates.len(),
                    customers = customers.len(),
                    "Catalog loaded"
                );
                self.templates = Load::Ready(templates);
                self.customers = Load::Ready(customers);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load catalog");
                self.templates = Load::Failed(e.to_string());
                self.customers = Load::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Step 1 → 2
    pub fn select_template(&mut self, template_id: &str) -> std::result::Result<(), WizardError> {
        if !matches!(self.state, WizardState::SelectTemplate) {
            return Err(self.state.wrong_step());
        }
        let templates = self.templates.ready().ok_or(WizardError::CatalogNotReady)?;
        if !templates.iter().any(|t| t.id == template_id) {
            return Err(WizardError::UnknownTemplate(template_id.to_string()));
        }

        self.transition(WizardState::SelectCustomer {
            template_id: template_id.to_string(),
        });
        Ok(())
    }

    /// Step 2 → 3
    pub fn select_customer(&mut self, customer_id: &str) -> std::result::Result<(), WizardError> {
        let template_id = match &self.state {
            WizardState::SelectCustomer { template_id } => template_id.clone(),
            other => return Err(other.wrong_step()),
        };
        let customers = self.customers.ready().ok_or(WizardError::CatalogNotReady)?;
        if !customers.iter().any(|c| c.id == customer_id) {
            return Err(WizardError::UnknownCustomer(customer_id.to_string()));
        }

        self.transition(WizardState::ConfirmDeploy {
            template_id,
            customer_id: customer_id.to_string(),
            deployment_name: String::new(),
        });
        Ok(())
    }

    pub fn set_deployment_name(&mut self, name: &str) -> std::result::Result<(), WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }
        match &mut self.state {
            WizardState::ConfirmDeploy {
                deployment_name, ..
            } => {
                *deployment_name = name.to_string();
                Ok(())
            }
            other => Err(other.wrong_step()),
        }
    }

    /// Whether the deploy control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.busy
            && matches!(
                &self.state,
                WizardState::ConfirmDeploy { deployment_name, .. } if !deployment_name.is_empty()
            )
    }

    /// Go one step back. The deployment name is discarded when leaving step 3.
    pub fn back(&mut self) {
        if self.busy {
            return;
        }
        let previous = match &self.state {
            WizardState::SelectCustomer { .. } => WizardState::SelectTemplate,
            WizardState::ConfirmDeploy { template_id, .. } => WizardState::SelectCustomer {
                template_id: template_id.clone(),
            },
            _ => return,
        };
        self.transition(previous);
    }

    /// Start over from step 1, keeping the loaded catalog
    pub fn reset(&mut self) {
        if self.busy {
            return;
        }
        self.transition(WizardState::SelectTemplate);
    }

    /// Validate the confirm step and mark the wizard busy. The step is
    /// frozen until `finish_submit` applies the outcome.
    pub fn begin_submit(&mut self) -> std::result::Result<DeploymentRequest, WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }
        let request = self.pending_request()?;
        self.busy = true;
        Ok(request)
    }

    /// Request built from the confirm step
    fn pending_request(&self) -> std::result::Result<DeploymentRequest, WizardError> {
        match &self.state {
            WizardState::ConfirmDeploy {
                template_id,
                customer_id,
                deployment_name,
            } => {
                if deployment_name.is_empty() {
                    return Err(WizardError::MissingName);
                }
                Ok(DeploymentRequest {
                    template_id: template_id.clone(),
                    customer_id: customer_id.clone(),
                    deployment_name: deployment_name.clone(),
                })
            }
            other => Err(other.wrong_step()),
        }
    }

    /// Apply the outcome of the request started by `begin_submit`: notify
    /// once and clear the busy flag. On failure the selections are kept so
    /// the user can retry. Without a submission in flight nothing changes.
    pub fn finish_submit(&mut self, outcome: Result<()>, notifier: &dyn Notifier) -> Result<()> {
        if !self.busy {
            return Err(WizardError::NotSubmitting.into());
        }
        let request = self.pending_request()?;
        self.busy = false;

        match outcome {
            Ok(()) => {
                info!(
                    template_id = %request.template_id,
                    customer_id = %request.customer_id,
                    deployment_name = %request.deployment_name,
                    "Agent deployed"
                );
                notifier.notify(Notification::success(DEPLOY_SUCCEEDED));
                self.transition(WizardState::Deployed { request });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, deployment_name = %request.deployment_name, "Deployment failed");
                notifier.notify(Notification::error(DEPLOY_FAILED));
                Err(e)
            }
        }
    }

    /// Submit the deployment. Rejected without a request unless `can_submit`.
    pub async fn submit(&mut self, api: &dyn AgentHubApi, notifier: &dyn Notifier) -> Result<()> {
        let request = self.begin_submit().map_err(HubError::from)?;
        let outcome = api.deploy(&request).await;
        self.finish_submit(outcome, notifier)
    }

    fn transition(&mut self, next: WizardState) {
        info!(from = %self.state, to = %next, step = next.step(), "Wizard transition");
        self.state = next;
    }
}

impl Default for DeploymentWizard {
    fn default() -> Self {
        Self::new()
    }
}
