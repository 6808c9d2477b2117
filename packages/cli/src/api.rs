//! API Client setup and terminal notifications

use agent_hub_core::{HttpClient, Notification, Notifier};
use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;

/// Create a client from saved config, honouring `--api-url`
pub fn client(api_url: Option<&str>) -> Result<HttpClient> {
    let config = Config::load()?;
    let base_url = config.api_url(api_url);
    tracing::debug!(base_url, "Using Agent Hub API");

    HttpClient::new(base_url, config.timeout())
        .with_context(|| format!("Cannot use API URL {}", base_url))
}

/// Prints notifications as a single status line
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match &notification {
            Notification::Success(message) => {
                println!("{} {}", "✓".green().bold(), message);
            }
            Notification::Error(message) => {
                eprintln!("{} {}", "✗".red().bold(), message);
            }
        }
    }
}
