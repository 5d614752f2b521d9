pub mod handler;

use crate::models::ClientContact;
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub use handler::handle_clients_command;

#[derive(Args)]
pub struct ClientsCommands {
    #[command(subcommand)]
    pub command: ClientsSubcommand,
}

#[derive(Subcommand)]
pub enum ClientsSubcommand {
    /// List clients a page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long, help = "Only clients with (true) or without (false) a PCO")]
        assigned: Option<bool>,
        #[arg(long, help = "Also export the page to a CSV file")]
        csv: Option<PathBuf>,
    },
    /// Show one client
    Show { id: u64 },
    /// Create a client
    Add(ClientFields),
    /// Update a client; only the given fields change
    Update {
        id: u64,
        #[command(flatten)]
        fields: ClientFields,
    },
    /// Delete a client
    Delete {
        id: u64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Assign clients to a PCO
    Assign {
        pco_id: u64,
        #[arg(required = true)]
        client_ids: Vec<u64>,
    },
    /// Remove the PCO from a client
    Unassign { client_id: u64 },
}

#[derive(Args, Default)]
pub struct ClientFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub address2: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Contact as NAME:NUMBER[:EMAIL]; replaces all contacts (repeatable)
    #[arg(long = "contact", value_parser = parse_contact)]
    pub contacts: Vec<ClientContact>,
}

fn parse_contact(raw: &str) -> Result<ClientContact, String> {
    let mut parts = raw.splitn(3, ':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let number = parts.next().unwrap_or_default();
    if name.is_empty() || number.is_empty() {
        return Err("expected NAME:NUMBER[:EMAIL]".to_string());
    }
    Ok(ClientContact {
        name: name.to_string(),
        number: number.to_string(),
        email: parts.next().filter(|e| !e.is_empty()).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contact() {
        let contact = parse_contact("Ann Smith: 021 555 0101 : ann@example.com").unwrap();
        assert_eq!(contact.name, "Ann Smith");
        assert_eq!(contact.number, "021 555 0101");
        assert_eq!(contact.email.as_deref(), Some("ann@example.com"));

        assert!(parse_contact("Ann").is_err());
        assert!(parse_contact("Bob:555").unwrap().email.is_none());
    }
}
