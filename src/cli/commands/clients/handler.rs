//! Client command handler

use anyhow::Result;
use colored::*;

use super::{ClientFields, ClientsCommands, ClientsSubcommand};
use crate::cli::ui::{self, confirm, finish, print_table, with_spinner};
use crate::console::Choice;
use crate::console::pages::ClientsPage;
use crate::context::AppContext;
use crate::models::{Client, ClientForm};

const HEADERS: &[&str] = &["ID", "Name", "Address", "Contact", "PCO", "Reports", "Status"];

pub async fn handle_clients_command(ctx: AppContext, args: ClientsCommands) -> Result<()> {
    let mut page = ClientsPage::new(ctx);

    match args.command {
        ClientsSubcommand::List {
            page: page_number,
            limit,
            search,
            status,
            assigned,
            csv,
        } => {
            if let Some(limit) = limit {
                page.query.limit = limit.max(1);
            }
            page.query.search = search.clone();
            page.filter.search = search.unwrap_or_default();
            page.filter.status = status.map_or(Choice::All, Choice::Only);
            page.filter.assigned = assigned.map_or(Choice::All, Choice::Only);

            if !with_spinner("Loading clients...", page.go_to_page(page_number)).await {
                return finish(&mut page.notifications, false);
            }
            let rows: Vec<Vec<String>> = page.visible().into_iter().map(client_row).collect();
            println!();
            print_table(HEADERS, &rows);
            if let Some(pagination) = page.list.pagination() {
                println!();
                println!(
                    "  {} {} of {} ({} clients)",
                    "Page".dimmed(),
                    pagination.current_page,
                    pagination.total_pages.max(1),
                    pagination.total_records
                );
            }
            if let Some(path) = csv {
                let written = ui::write_csv(&path, HEADERS, &rows)?;
                println!("  {} {} rows to {}", "Exported".bright_green(), written, path.display());
            }
            finish(&mut page.notifications, true)
        }
        ClientsSubcommand::Show { id } => {
            let client = with_spinner("Loading client...", page.fetch_client(id)).await;
            if let Some(client) = &client {
                print_client(client);
            }
            finish(&mut page.notifications, client.is_some())
        }
        ClientsSubcommand::Add(fields) => {
            page.start_create();
            if let Some(form) = page.modal.form_mut() {
                apply_fields(form, fields);
            }
            let ok = with_spinner("Creating client...", page.submit()).await;
            finish(&mut page.notifications, ok)
        }
        ClientsSubcommand::Update { id, fields } => {
            let Some(client) = with_spinner("Loading client...", page.fetch_client(id)).await else {
                return finish(&mut page.notifications, false);
            };
            page.start_edit(&client);
            if let Some(form) = page.modal.form_mut() {
                apply_fields(form, fields);
            }
            let ok = with_spinner("Updating client...", page.submit()).await;
            finish(&mut page.notifications, ok)
        }
        ClientsSubcommand::Delete { id, yes } => {
            if !confirm(&format!("Delete client {}?", id), yes)? {
                println!("{} Cancelled.", "✗".bright_red().bold());
                return Ok(());
            }
            page.request_delete(id);
            let ok = with_spinner("Deleting client...", page.confirm_delete()).await;
            finish(&mut page.notifications, ok)
        }
        ClientsSubcommand::Assign { pco_id, client_ids } => {
            let ok = with_spinner("Assigning clients...", page.assign(client_ids, pco_id)).await;
            finish(&mut page.notifications, ok)
        }
        ClientsSubcommand::Unassign { client_id } => {
            let ok = with_spinner("Unassigning client...", page.unassign(client_id)).await;
            finish(&mut page.notifications, ok)
        }
    }
}

fn apply_fields(form: &mut ClientForm, fields: ClientFields) {
    if let Some(name) = fields.name {
        form.company_name = name;
    }
    if let Some(address) = fields.address {
        form.address_line1 = address;
    }
    if let Some(address2) = fields.address2 {
        form.address_line2 = address2;
    }
    if let Some(city) = fields.city {
        form.city = city;
    }
    if let Some(state) = fields.state {
        form.state = state;
    }
    if let Some(postal_code) = fields.postal_code {
        form.postal_code = postal_code;
    }
    if let Some(status) = fields.status {
        form.status = status;
    }
    if !fields.contacts.is_empty() {
        form.contacts = fields.contacts;
    }
}

fn client_row(client: &Client) -> Vec<String> {
    let contact = client
        .primary_contact()
        .map(|c| format!("{} {}", c.name, c.number))
        .unwrap_or_default();
    let pco = client
        .assigned_pco
        .as_ref()
        .map(|pco| format!("{} ({})", pco.name, pco.pco_number))
        .unwrap_or_else(|| "-".to_string());
    vec![
        client.id.to_string(),
        client.name.clone(),
        client.full_address(),
        contact,
        pco,
        client.total_reports.to_string(),
        client.status.clone(),
    ]
}

fn print_client(client: &Client) {
    println!();
    println!("  {} {}", client.name.bright_blue().bold(), format!("#{}", client.id).dimmed());
    println!("    {}: {}", "Address".dimmed(), client.full_address());
    println!("    {}: {}", "Status".dimmed(), client.status);
    match &client.assigned_pco {
        Some(pco) => println!("    {}: {} ({})", "PCO".dimmed(), pco.name.cyan(), pco.pco_number),
        None => println!("    {}: {}", "PCO".dimmed(), "unassigned".dimmed()),
    }
    println!("    {}: {}", "Reports".dimmed(), client.total_reports);
    for contact in &client.contacts {
        let email = contact.email.as_deref().unwrap_or("");
        println!("    {}: {} {} {}", "Contact".dimmed(), contact.name, contact.number, email.cyan());
    }
}
