use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Set the Agent Hub API base URL
    SetUrl {
        /// Base URL, e.g. https://hub.example.com
        url: String,
    },
    /// Remove all saved settings
    Reset,
}

pub async fn run(cmd: ConfigCommands, api_url: Option<&str>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load()?;
            println!("{}", "Current Configuration:".bold());
            println!("  API URL: {}", config.api_url(api_url).cyan());
            println!("  Timeout: {}s", config.timeout().as_secs());
            println!(
                "  File:    {}",
                Config::path()?.display().to_string().dimmed()
            );
        }

        ConfigCommands::SetUrl { url } => {
            // An unreadable file is reported rather than overwritten
            let mut config = Config::load()?;
            config.set_api_url(&url)?;
            config.save()?;
            println!(
                "{} API URL set to {}",
                "✓".green().bold(),
                config.api_url(None).cyan()
            );
        }

        ConfigCommands::Reset => {
            Config::default().save()?;
            println!("{} Configuration reset", "✓".green().bold());
        }
    }

    Ok(())
}
