use agent_hub_core::ProfileTab;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod output;

use commands::config::ConfigCommands;
use commands::deploy::DeployArgs;

#[derive(Parser)]
#[command(name = "agent-hub", about = "Agent Hub CLI - Deploy agents and inspect agent profiles")]
#[command(version, propagate_version = true)]
struct Cli {
    /// Agent Hub API base URL (overrides the config file)
    #[arg(long, global = true, env = "AGENT_HUB_API_URL")]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy an agent from a template to a customer
    Deploy {
        /// Template ID (skips step 1)
        #[arg(short, long)]
        template: Option<String>,

        /// Customer ID (skips step 2)
        #[arg(short, long)]
        customer: Option<String>,

        /// Deployment name (skips the name prompt)
        #[arg(short, long)]
        name: Option<String>,

        /// Deploy without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List agent templates
    Templates,

    /// List customers
    Customers,

    /// Show an agent's profile
    Agent {
        /// Agent ID
        agent_id: String,

        /// Tab to show: overview, capabilities, metrics, integration, config
        #[arg(short, long, default_value = "overview")]
        tab: ProfileTab,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let api_url = cli.api_url.as_deref();

    match cli.command {
        Commands::Deploy {
            template,
            customer,
            name,
            yes,
        } => {
            let args = DeployArgs {
                template,
                customer,
                name,
                yes,
            };
            commands::deploy::run(args, api_url).await
        }
        Commands::Templates => {
            commands::catalog::templates(api_url).await
        }
        Commands::Customers => {
            commands::catalog::customers(api_url).await
        }
        Commands::Agent { agent_id, tab } => {
            commands::agent::run(&agent_id, tab, api_url).await
        }
        Commands::Config { command } => {
            commands::config::run(command, api_url).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_agent_tab() {
        let cli = Cli::try_parse_from(["agent-hub", "agent", "agent-7", "--tab", "metrics"]).unwrap();
        match cli.command {
            Commands::Agent { agent_id, tab } => {
                assert_eq!(agent_id, "agent-7");
                assert_eq!(tab, ProfileTab::Performance);
            }
            _ => panic!("Expected agent command"),
        }
    }

    #[test]
    fn test_parse_deploy_flags() {
        let cli = Cli::try_parse_from([
            "agent-hub",
            "deploy",
            "-t",
            "tpl-1",
            "-c",
            "cus-1",
            "-n",
            "acme-support",
            "--yes",
        ])
        .unwrap();
        match cli.command {
            Commands::Deploy {
                template,
                customer,
                name,
                yes,
            } => {
                assert_eq!(template.as_deref(), Some("tpl-1"));
                assert_eq!(customer.as_deref(), Some("cus-1"));
                assert_eq!(name.as_deref(), Some("acme-support"));
                assert!(yes);
            }
            _ => panic!("Expected deploy command"),
        }
    }
}
