use agent_hub_core::AgentHubApi;
use anyhow::{Context, Result};
use colored::Colorize;

use crate::api;

/// List deployable agent templates
pub async fn templates(api_url: Option<&str>) -> Result<()> {
    let api = api::client(api_url)?;
    let templates = api
        .list_templates()
        .await
        .context("Failed to load templates")?;

    if templates.is_empty() {
        println!("{}", "No agent templates found.".dimmed());
        return Ok(());
    }

    println!("{}", "Agent Templates".bold());
    println!("{}", "─".repeat(60));

    for template in &templates {
        println!(
            "  {} {}",
            template.name.bold(),
            format!("({})", template.base_agent).dimmed()
        );
        println!("    {}", template.description.dimmed());
        println!("    ID: {}", template.id.dimmed());
        println!();
    }

    println!("{} template(s)", templates.len());

    Ok(())
}

/// List customers that can receive a deployment
pub async fn customers(api_url: Option<&str>) -> Result<()> {
    let api = api::client(api_url)?;
    let customers = api
        .list_customers()
        .await
        .context("Failed to load customers")?;

    if customers.is_empty() {
        println!("{}", "No customers found.".dimmed());
        return Ok(());
    }

    println!("{}", "Customers".bold());
    println!("{}", "─".repeat(60));
    println!(
        "  {:<24} {:<24} {}",
        "ID".dimmed(),
        "NAME".dimmed(),
        "ORGANIZATION".dimmed()
    );

    for customer in &customers {
        println!(
            "  {:<24} {:<24} {}",
            customer.id, customer.name, customer.organization
        );
    }

    println!();
    println!("{} customer(s)", customers.len());

    Ok(())
}
