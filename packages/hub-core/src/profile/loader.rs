//! Profile Loader
//!
//! Fetches one agent's profile and metrics as a cancellable unit of work.
//! Starting a new load cancels the previous one, and a result is only
//! applied while its generation is still the current one.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::client::AgentHubApi;
use crate::api::types::{AgentMetrics, AgentProfile};
use crate::error::Result;
use crate::notify::{Notification, Notifier, PROFILE_LOAD_FAILED};

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Idle,
    Loading {
        agent_id: String,
    },
    Loaded {
        agent_id: String,
        profile: AgentProfile,
        metrics: Option<AgentMetrics>,
    },
    Failed {
        agent_id: String,
    },
}

impl ProfileState {
    pub fn agent_id(&self) -> Option<&str> {
        match self {
            ProfileState::Idle => None,
            ProfileState::Loading { agent_id }
            | ProfileState::Loaded { agent_id, .. }
            | ProfileState::Failed { agent_id } => Some(agent_id),
        }
    }

    pub fn profile(&self) -> Option<&AgentProfile> {
        match self {
            ProfileState::Loaded { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn metrics(&self) -> Option<&AgentMetrics> {
        match self {
            ProfileState::Loaded { metrics, .. } => metrics.as_ref(),
            _ => None,
        }
    }
}

struct LoaderInner {
    state: ProfileState,
    generation: u64,
    cancel: Option<CancellationToken>,
}

#[derive(Clone)]
pub struct ProfileLoader {
    api: Arc<dyn AgentHubApi>,
    notifier: Arc<dyn Notifier>,
    inner: Arc<RwLock<LoaderInner>>,
}

impl ProfileLoader {
    pub fn new(api: Arc<dyn AgentHubApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            inner: Arc::new(RwLock::new(LoaderInner {
                state: ProfileState::Idle,
                generation: 0,
                cancel: None,
            })),
        }
    }

    pub fn state(&self) -> ProfileState {
        self.inner.read().state.clone()
    }

    /// Start loading `agent_id`, cancelling whatever was in flight
    pub fn load(&self, agent_id: &str) -> JoinHandle<()> {
        let token = CancellationToken::new();
        let generation = {
            let mut inner = self.inner.write();
            if let Some(previous) = inner.cancel.replace(token.clone()) {
                previous.cancel();
            }
            inner.generation += 1;
            inner.state = ProfileState::Loading {
                agent_id: agent_id.to_string(),
            };
            inner.generation
        };
        debug!(agent_id, generation, "Loading agent profile");

        let api = self.api.clone();
        let notifier = self.notifier.clone();
        let inner = self.inner.clone();
        let agent_id = agent_id.to_string();

        tokio::spawn(async move {
            let fetch = async {
                tokio::try_join!(api.get_agent(&agent_id), api.get_metrics(&agent_id))
            };

            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!(agent_id = %agent_id, generation, "Profile load cancelled");
                    return;
                }
                result = fetch => result,
            };

            apply(&inner, notifier.as_ref(), generation, agent_id, result);
        })
    }

    /// Load and wait for the outcome
    pub async fn load_and_wait(&self, agent_id: &str) -> ProfileState {
        if let Err(e) = self.load(agent_id).await {
            warn!(error = %e, agent_id, "Profile load task failed");
        }
        self.state()
    }

    /// Drop the in-flight load, if any, and go back to idle
    pub fn cancel(&self) {
        let mut inner = self.inner.write();
        if let Some(token) = inner.cancel.take() {
            token.cancel();
        }
        inner.generation += 1;
        inner.state = ProfileState::Idle;
    }
}

fn apply(
    inner: &RwLock<LoaderInner>,
    notifier: &dyn Notifier,
    generation: u64,
    agent_id: String,
    result: Result<(AgentProfile, Option<AgentMetrics>)>,
) {
    let failed = {
        let mut inner = inner.write();
        if inner.generation != generation {
            debug!(agent_id = %agent_id, generation, current = inner.generation, "Discarding stale profile response");
            return;
        }
        inner.cancel = None;

        match result {
            Ok((profile, metrics)) => {
                if let Some(m) = &metrics {
                    if !m.is_aligned() {
                        warn!(agent_id = %agent_id, "Metric series lengths differ from timestamps");
                    }
                }
                info!(agent_id = %agent_id, has_metrics = metrics.is_some(), "Agent profile loaded");
                inner.state = ProfileState::Loaded {
                    agent_id,
                    profile,
                    metrics,
                };
                false
            }
            Err(e) => {
                warn!(agent_id = %agent_id, error = %e, "Failed to load agent data");
                inner.state = ProfileState::Failed { agent_id };
                true
            }
        }
    };

    if failed {
        notifier.notify(Notification::error(PROFILE_LOAD_FAILED));
    }
}
