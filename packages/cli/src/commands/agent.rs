use agent_hub_core::profile::view::{
    model_settings, resource_allocation, MetricKind, AGENT_STATUS, INTEGRATION_SCOPES,
};
use agent_hub_core::{
    capability_label, AgentMetrics, AgentProfile, ProfileLoader, ProfileState, ProfileTab,
};
use anyhow::{bail, Result};
use colored::Colorize;
use std::sync::Arc;

use crate::api::{self, TerminalNotifier};
use crate::output::{format_timestamp, sparkline, spinner};

/// Show one tab of an agent's profile
pub async fn run(agent_id: &str, tab: ProfileTab, api_url: Option<&str>) -> Result<()> {
    let api = Arc::new(api::client(api_url)?);
    let loader = ProfileLoader::new(api, Arc::new(TerminalNotifier));

    let spinner = spinner(&format!("Loading agent {}...", agent_id))?;
    let state = loader.load_and_wait(agent_id).await;
    spinner.finish_and_clear();

    let (profile, metrics) = match state {
        ProfileState::Loaded {
            profile, metrics, ..
        } => (profile, metrics),
        _ => bail!("Could not load agent {}", agent_id),
    };

    print_header(&profile);
    print_tab_bar(tab);

    match tab {
        ProfileTab::Overview => print_overview(&profile),
        ProfileTab::Capabilities => print_capabilities(&profile),
        ProfileTab::Performance => print_performance(metrics.as_ref()),
        ProfileTab::Integration => print_integration(&profile),
        ProfileTab::Configuration => print_configuration()?,
    }

    Ok(())
}

fn print_header(profile: &AgentProfile) {
    println!("{}", profile.name.bold());
    println!("Endpoint ID: {}", profile.endpoint_id.dimmed());
    println!(
        "{} {}",
        format!("[{}]", profile.region).cyan(),
        format!("[{}]", profile.version_label()).cyan()
    );
    println!();
}

fn print_tab_bar(active: ProfileTab) {
    let tabs: Vec<String> = ProfileTab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                tab.title().bold().underline().to_string()
            } else {
                tab.title().dimmed().to_string()
            }
        })
        .collect();
    println!("{}", tabs.join("  "));
    println!("{}", "─".repeat(70));
}

fn print_overview(profile: &AgentProfile) {
    println!("{}", "Agent Overview".bold());
    println!("  {:<16} {}", "Specialization".dimmed(), profile.specialization);
    println!("  {:<16} {}", "Region".dimmed(), profile.region);
    println!("  {:<16} {}", "Status".dimmed(), AGENT_STATUS.green());
    println!("  {:<16} {}", "Version".dimmed(), profile.release_label());
}

fn print_capabilities(profile: &AgentProfile) {
    println!("{}", "Capabilities".bold());
    if profile.capabilities.is_empty() {
        println!("  {}", "No capabilities listed.".dimmed());
        return;
    }
    for capability in &profile.capabilities {
        println!("  {} {}", "•".blue(), capability_label(capability));
    }
}

fn print_performance(metrics: Option<&AgentMetrics>) {
    println!("{}", "Performance Metrics".bold());
    let Some(metrics) = metrics else {
        println!("  {}", "No metrics available.".dimmed());
        return;
    };

    for kind in MetricKind::ALL {
        let series = metrics.series(kind);
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();

        println!();
        println!("  {} {}", kind.title().bold(), sparkline(&values).blue());
        if series.is_empty() {
            println!("    {}", "No data points.".dimmed());
            continue;
        }
        for point in &series {
            println!(
                "    {:<20} {:>12.2}",
                format_timestamp(&point.timestamp).dimmed(),
                point.value
            );
        }
    }
}

fn print_integration(profile: &AgentProfile) {
    println!("{}", "Integration Guide".bold());
    println!();
    println!("  {}", "Endpoint URL".bold());
    println!("    {}", profile.endpoint_url().cyan());
    println!();
    println!("  {}", "Authentication".bold());
    println!("    Use OAuth 2.0 for authentication. Required scopes:");
    for scope in INTEGRATION_SCOPES {
        println!("    {} {}", "-".dimmed(), scope);
    }
}

fn print_configuration() -> Result<()> {
    println!("{}", "Configuration".bold());
    println!();
    println!("  {}", "Model Settings".bold());
    print_json(&model_settings())?;
    println!();
    println!("  {}", "Resource Allocation".bold());
    print_json(&resource_allocation())?;
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    for line in serde_json::to_string_pretty(value)?.lines() {
        println!("    {}", line);
    }
    Ok(())
}
