pub mod handler;

use crate::models::ChemicalCategory;
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub use handler::handle_chemicals_command;

#[derive(Args)]
pub struct ChemicalsCommands {
    #[command(subcommand)]
    pub command: ChemicalsSubcommand,
}

#[derive(Subcommand)]
pub enum ChemicalsSubcommand {
    /// List chemicals, including deactivated ones
    List {
        #[arg(long, value_parser = parse_category)]
        category: Option<ChemicalCategory>,
        #[arg(long, help = "Only active (true) or inactive (false) chemicals")]
        active: Option<bool>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "Also export the list to a CSV file")]
        csv: Option<PathBuf>,
    },
    /// Register a chemical
    Add(ChemicalFields),
    /// Update a chemical; only the given fields change
    Update {
        id: u64,
        #[command(flatten)]
        fields: ChemicalFields,
    },
    /// Deactivate a chemical (soft delete)
    Deactivate {
        id: u64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Reactivate a deactivated chemical
    Activate { id: u64 },
    /// Permanently delete an unused, deactivated chemical
    Delete {
        id: u64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Args, Default)]
pub struct ChemicalFields {
    #[arg(long)]
    pub l_number: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub chemical_type: Option<String>,
    #[arg(long, value_parser = parse_category)]
    pub category: Option<ChemicalCategory>,
    #[arg(long)]
    pub unit: Option<String>,
}

fn parse_category(raw: &str) -> Result<ChemicalCategory, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}
