//! Agent Hub Core Library
//!
//! This crate provides the client side of the Agent Hub: the typed REST
//! client, the deployment wizard state machine, and the agent profile view
//! model with its cancellable loader.

pub mod api;
pub mod error;
pub mod notify;
pub mod profile;
pub mod wizard;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use api::client::{AgentHubApi, HttpClient};
pub use api::types::{AgentMetrics, AgentProfile, Customer, DeploymentRequest, Template};
pub use error::{HubError, WizardError};
pub use notify::{Notification, Notifier};
pub use profile::loader::{ProfileLoader, ProfileState};
pub use profile::view::{capability_label, chart_series, ProfileTab, SeriesPoint};
pub use wizard::state::{DeploymentWizard, Load, WizardState};
