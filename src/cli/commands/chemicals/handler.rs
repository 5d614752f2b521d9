//! Chemical command handler

use anyhow::Result;
use colored::*;

use super::{ChemicalFields, ChemicalsCommands, ChemicalsSubcommand};
use crate::cli::ui::{self, active_badge, confirm, finish, print_table, with_spinner};
use crate::console::Choice;
use crate::console::pages::ChemicalsPage;
use crate::context::AppContext;
use crate::models::{Chemical, ChemicalForm};

const HEADERS: &[&str] = &["ID", "L number", "Name", "Type", "Category", "Unit", "Used", "Status"];

pub async fn handle_chemicals_command(ctx: AppContext, args: ChemicalsCommands) -> Result<()> {
    let mut page = ChemicalsPage::new(ctx);

    match args.command {
        ChemicalsSubcommand::List {
            category,
            active,
            search,
            csv,
        } => {
            page.filter.search = search.unwrap_or_default();
            page.filter.category = category.map_or(Choice::All, Choice::Only);
            page.filter.active = active.map_or(Choice::All, Choice::Only);
            if !with_spinner("Loading chemicals...", page.reload()).await {
                return finish(&mut page.notifications, false);
            }

            let visible = page.visible();
            let rows: Vec<Vec<String>> = visible.iter().map(|c| chemical_row(c, true)).collect();
            println!();
            print_table(HEADERS, &rows);
            if let Some(path) = csv {
                let plain: Vec<Vec<String>> = visible.iter().map(|c| chemical_row(c, false)).collect();
                let written = ui::write_csv(&path, HEADERS, &plain)?;
                println!("  {} {} rows to {}", "Exported".bright_green(), written, path.display());
            }
            finish(&mut page.notifications, true)
        }
        ChemicalsSubcommand::Add(fields) => {
            page.start_create();
            if let Some(form) = page.modal.form_mut() {
                apply_fields(form, fields);
            }
            let ok = with_spinner("Creating chemical...", page.submit()).await;
            finish(&mut page.notifications, ok)
        }
        ChemicalsSubcommand::Update { id, fields } => {
            if !with_spinner("Loading chemicals...", page.reload()).await || !page.start_edit(id) {
                return finish(&mut page.notifications, false);
            }
            if let Some(form) = page.modal.form_mut() {
                apply_fields(form, fields);
            }
            let ok = with_spinner("Updating chemical...", page.submit()).await;
            finish(&mut page.notifications, ok)
        }
        ChemicalsSubcommand::Deactivate { id, yes } => {
            if !confirm(&format!("Deactivate chemical {}?", id), yes)? {
                println!("{} Cancelled.", "✗".bright_red().bold());
                return Ok(());
            }
            page.request_deactivate(id);
            let ok = with_spinner("Deactivating chemical...", page.confirm_deactivate()).await;
            finish(&mut page.notifications, ok)
        }
        ChemicalsSubcommand::Activate { id } => {
            let ok = with_spinner("Activating chemical...", page.reactivate(id)).await;
            finish(&mut page.notifications, ok)
        }
        ChemicalsSubcommand::Delete { id, yes } => {
            if !with_spinner("Loading chemicals...", page.reload()).await
                || !page.request_permanent_delete(id)
            {
                return finish(&mut page.notifications, false);
            }
            let prompt = format!("Permanently delete chemical {}? This cannot be undone", id);
            if !confirm(&prompt, yes)? {
                page.cancel_permanent_delete();
                println!("{} Cancelled.", "✗".bright_red().bold());
                return Ok(());
            }
            let ok = with_spinner("Deleting chemical...", page.confirm_permanent_delete()).await;
            finish(&mut page.notifications, ok)
        }
    }
}

fn apply_fields(form: &mut ChemicalForm, fields: ChemicalFields) {
    if let Some(l_number) = fields.l_number {
        form.l_number = l_number;
    }
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(chemical_type) = fields.chemical_type {
        form.chemical_type = chemical_type;
    }
    if let Some(category) = fields.category {
        form.category = category;
    }
    if let Some(unit) = fields.unit {
        form.quantity_unit = unit;
    }
}

fn chemical_row(chemical: &Chemical, colored: bool) -> Vec<String> {
    let status = if colored {
        active_badge(chemical.is_active).to_string()
    } else if chemical.is_active {
        "active".to_string()
    } else {
        "inactive".to_string()
    };
    vec![
        chemical.id.to_string(),
        chemical.l_number.clone(),
        chemical.name.clone(),
        chemical.chemical_type.clone(),
        chemical.category.to_string(),
        chemical.quantity_unit.clone(),
        chemical.total_usage_count.to_string(),
        status,
    ]
}
