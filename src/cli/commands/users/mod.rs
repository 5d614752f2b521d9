pub mod handler;

use crate::models::UserRole;
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub use handler::handle_users_command;

#[derive(Args)]
pub struct UsersCommands {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand)]
pub enum UsersSubcommand {
    /// List admins and PCOs
    List {
        #[arg(long, value_parser = parse_role)]
        role: Option<UserRole>,
        #[arg(long, help = "active, inactive or suspended")]
        status: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "Also export the list to a CSV file")]
        csv: Option<PathBuf>,
    },
    /// Show one user
    Show { id: u64 },
    /// Create a user
    Add(UserFields),
    /// Update a user; only the given fields change
    Update {
        id: u64,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user
    Delete {
        id: u64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Args, Default)]
pub struct UserFields {
    #[arg(long)]
    pub pco_number: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, value_parser = parse_role)]
    pub role: Option<UserRole>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, help = "Password; prompted for when creating without one")]
    pub password: Option<String>,
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}
