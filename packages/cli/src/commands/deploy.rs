use agent_hub_core::wizard::state::TOTAL_STEPS;
use agent_hub_core::{AgentHubApi, DeploymentWizard, HubError, Load, WizardState};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use crate::api::{self, TerminalNotifier};
use crate::output::{progress_bar, spinner};

const BACK: &str = "← Back";

/// Selections given on the command line. Each one is used once; after
/// going back or starting over the wizard prompts instead.
#[derive(Debug, Default)]
pub struct DeployArgs {
    pub template: Option<String>,
    pub customer: Option<String>,
    pub name: Option<String>,
    pub yes: bool,
}

enum Confirmation {
    Deploy,
    Back,
    Cancel,
}

/// Run the deployment wizard
pub async fn run(mut args: DeployArgs, api_url: Option<&str>) -> Result<()> {
    let api = api::client(api_url)?;
    let notifier = TerminalNotifier;
    let mut wizard = DeploymentWizard::new();
    let mut retrying = false;

    let spinner = spinner("Loading templates and customers...")?;
    let loaded = wizard.load_catalog(&api).await;
    spinner.finish_and_clear();
    loaded.context("Could not load templates and customers")?;

    loop {
        print_progress(&wizard);

        match wizard.state().clone() {
            WizardState::SelectTemplate => {
                let template_id = match args.template.take() {
                    Some(id) => id,
                    None => match pick_template(&wizard)? {
                        Some(id) => id,
                        None => return Ok(()),
                    },
                };
                wizard.select_template(&template_id)?;
            }

            WizardState::SelectCustomer { .. } => match args.customer.take() {
                Some(id) => wizard.select_customer(&id)?,
                None => match pick_customer(&wizard)? {
                    Some(id) => wizard.select_customer(&id)?,
                    None => wizard.back(),
                },
            },

            WizardState::ConfirmDeploy { .. } => {
                let name = match given_name(args.name.take()) {
                    Some(name) => name,
                    None => Input::<String>::new()
                        .with_prompt("Deployment name")
                        .validate_with(|input: &String| -> Result<(), &str> {
                            if input.trim().is_empty() {
                                Err("Deployment name cannot be empty")
                            } else {
                                Ok(())
                            }
                        })
                        .interact_text()?,
                };
                wizard.set_deployment_name(&name)?;
                print_summary(&wizard);

                let choice = if args.yes || std::mem::take(&mut retrying) {
                    Confirmation::Deploy
                } else {
                    confirm()?
                };
                match choice {
                    Confirmation::Deploy => {}
                    Confirmation::Back => {
                        wizard.back();
                        continue;
                    }
                    Confirmation::Cancel => {
                        println!("{}", "Deployment cancelled.".dimmed());
                        return Ok(());
                    }
                }

                if !submit(&mut wizard, &api, &notifier).await? {
                    if args.yes {
                        bail!("Deployment failed");
                    }
                    let retry = Confirm::new()
                        .with_prompt("Retry with the same selections?")
                        .default(true)
                        .interact()?;
                    if !retry {
                        return Ok(());
                    }
                    // Still on step 3 with the name kept
                    args.name = wizard.state().deployment_name().map(str::to_string);
                    retrying = true;
                }
            }

            WizardState::Deployed { request } => {
                println!();
                println!(
                    "  Deployment {} is being rolled out for {}",
                    request.deployment_name.cyan(),
                    request.customer_id.dimmed()
                );
                if args.yes {
                    return Ok(());
                }
                let again = Confirm::new()
                    .with_prompt("Deploy another agent?")
                    .default(false)
                    .interact()?;
                if !again {
                    return Ok(());
                }
                wizard.reset();
            }
        }
    }
}

/// Submit the confirmed deployment. `Ok(false)` means the hub call failed
/// and the selections are kept for a retry; a rejected submit is an error.
async fn submit(
    wizard: &mut DeploymentWizard,
    api: &dyn AgentHubApi,
    notifier: &TerminalNotifier,
) -> Result<bool> {
    let request = wizard.begin_submit()?;

    let spinner = spinner("Deploying...").ok();
    let outcome = api.deploy(&request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match wizard.finish_submit(outcome, notifier) {
        Ok(()) => Ok(true),
        Err(HubError::Wizard(e)) => Err(e.into()),
        Err(e) => {
            tracing::debug!(error = %e, "Deploy request failed");
            Ok(false)
        }
    }
}

/// A `--name` that is blank counts as not given
fn given_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

fn pick_template(wizard: &DeploymentWizard) -> Result<Option<String>> {
    let templates = match wizard.templates() {
        Load::Ready(templates) => templates,
        _ => bail!("Templates are not loaded"),
    };
    if templates.is_empty() {
        println!("{}", "No agent templates available.".dimmed());
        return Ok(None);
    }

    let items: Vec<String> = templates
        .iter()
        .map(|t| format!("{} {}", t.name.bold(), format!("- {}", t.description).dimmed()))
        .collect();

    let index = Select::new()
        .with_prompt("Select agent template")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Some(templates[index].id.clone()))
}

/// `None` means the user chose to go back
fn pick_customer(wizard: &DeploymentWizard) -> Result<Option<String>> {
    let customers = match wizard.customers() {
        Load::Ready(customers) => customers,
        _ => bail!("Customers are not loaded"),
    };

    let mut items: Vec<String> = customers.iter().map(|c| c.label()).collect();
    items.push(BACK.to_string());

    let index = Select::new()
        .with_prompt("Select customer")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(customers.get(index).map(|c| c.id.clone()))
}

fn confirm() -> Result<Confirmation> {
    let index = Select::new()
        .with_prompt("Deploy agent?")
        .items(&["Deploy", BACK, "Cancel"])
        .default(0)
        .interact()?;

    Ok(match index {
        0 => Confirmation::Deploy,
        1 => Confirmation::Back,
        _ => Confirmation::Cancel,
    })
}

fn print_progress(wizard: &DeploymentWizard) {
    let title = match wizard.state() {
        WizardState::SelectTemplate => "Select Agent Template",
        WizardState::SelectCustomer { .. } => "Select Customer",
        WizardState::ConfirmDeploy { .. } => "Confirm Deployment",
        WizardState::Deployed { .. } => "Deployed",
    };

    println!();
    println!(
        "{} {} {}",
        progress_bar(wizard.progress_percent(), 30).blue(),
        format!("{}/{}", wizard.step(), TOTAL_STEPS).dimmed(),
        title.bold()
    );
}

fn print_summary(wizard: &DeploymentWizard) {
    let template = wizard
        .selected_template()
        .map(|t| format!("{} ({})", t.name, t.base_agent))
        .unwrap_or_default();
    let customer = wizard
        .selected_customer()
        .map(|c| c.label())
        .unwrap_or_default();
    let name = wizard.state().deployment_name().unwrap_or_default();

    println!("  Template:   {}", template.cyan());
    println!("  Customer:   {}", customer.cyan());
    println!("  Name:       {}", name.cyan());
}
