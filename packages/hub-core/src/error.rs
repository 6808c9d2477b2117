//! Error types
//!
//! `HubError` covers everything that can go wrong talking to the Agent Hub
//! API. Misuse of the deployment wizard is reported as a `WizardError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body could not be decoded into the expected shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid API base URL {0:?}")]
    InvalidUrl(String),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Rejected wizard operations. None of these change wizard state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("operation not allowed at step {step} ({state})")]
    WrongStep { step: u8, state: &'static str },

    #[error("template and customer lists are not loaded")]
    CatalogNotReady,

    #[error("unknown template {0:?}")]
    UnknownTemplate(String),

    #[error("unknown customer {0:?}")]
    UnknownCustomer(String),

    #[error("deployment name is empty")]
    MissingName,

    #[error("a deployment is already being submitted")]
    Busy,

    #[error("no deployment is being submitted")]
    NotSubmitting,
}

pub type Result<T> = std::result::Result<T, HubError>;

impl HubError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            HubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
