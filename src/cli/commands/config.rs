//! Connection and identity settings

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::cli::ui::secret_or_prompt;
use crate::config::Config;
use crate::models::{CurrentUser, UserRole};

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the current configuration
    Show,
    /// Set the backend API base URL
    SetUrl { url: String },
    /// Set the API bearer token (prompted for when omitted)
    SetToken {
        token: Option<String>,
        #[arg(long, help = "Remove the stored token")]
        clear: bool,
    },
    /// Set the admin recorded on assignments
    SetUser {
        id: u64,
        name: String,
        #[arg(long, default_value = "admin", value_parser = parse_role)]
        role: UserRole,
    },
    /// Set how many rows list commands fetch per page
    SetPageSize { size: u64 },
}

pub fn config_command(mut config: Config, args: ConfigCommands) -> Result<()> {
    match args.command {
        ConfigSubcommand::Show => {
            show(&config)?;
            return Ok(());
        }
        ConfigSubcommand::SetUrl { url } => config.set_api_url(&url)?,
        ConfigSubcommand::SetToken { token, clear } => {
            let token = if clear {
                None
            } else {
                Some(secret_or_prompt(token, "API token")?)
            };
            config.set_api_token(token)?;
        }
        ConfigSubcommand::SetUser { id, name, role } => {
            config.set_current_user(CurrentUser { id, name, role })?;
        }
        ConfigSubcommand::SetPageSize { size } => config.update_page_size(size)?,
    }

    println!("{} Configuration saved", "✓".bright_green().bold());
    Ok(())
}

fn show(config: &Config) -> Result<()> {
    let path = Config::get_config_path()?;
    println!();
    println!("  {}", "pco-admin configuration".bright_blue().bold());
    println!("    {}: {}", "File".dimmed(), path.display().to_string().cyan());
    println!(
        "    {}: {}",
        "API URL".dimmed(),
        config.api_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "    {}: {}",
        "API token".dimmed(),
        if config.api_token.is_some() { "set".bright_green() } else { "not set".dimmed() }
    );
    match &config.current_user {
        Some(user) => println!("    {}: {} #{} ({})", "Current user".dimmed(), user.name, user.id, user.role),
        None => println!("    {}: {}", "Current user".dimmed(), "not set".dimmed()),
    }
    println!("    {}: {}", "Page size".dimmed(), config.settings.page_size);
    println!("    {}: {}s", "Request timeout".dimmed(), config.settings.request_timeout_secs);
    println!("    {}: {}s", "Report timeout".dimmed(), config.settings.report_timeout_secs);
    Ok(())
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}
