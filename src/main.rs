use anyhow::Result;
use clap::Parser;
use log::info;

use pco_admin::cli::commands::{
    assignments_command, config_command, dashboard_command, handle_chemicals_command,
    handle_clients_command, handle_reports_command, handle_users_command, notes_command,
};
use pco_admin::cli::{Cli, Commands};
use pco_admin::config::Config;
use pco_admin::context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to file, truncated on each run
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("pco-admin.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;
    info!("Starting pco-admin");

    match cli.command {
        Commands::Config(args) => config_command(config, args),
        command => {
            let ctx = AppContext::from_config(&config)?;
            dispatch(ctx, command).await
        }
    }
}

async fn dispatch(ctx: AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Dashboard(args) => dashboard_command(ctx, args).await,
        Commands::Reports(args) => handle_reports_command(ctx, args).await,
        Commands::Users(args) => handle_users_command(ctx, args).await,
        Commands::Clients(args) => handle_clients_command(ctx, args).await,
        Commands::Chemicals(args) => handle_chemicals_command(ctx, args).await,
        Commands::Assignments(args) => assignments_command(ctx, args).await,
        Commands::Notes(args) => notes_command(ctx, args).await,
        Commands::Config(_) => Ok(()),
    }
}
