//! User command handler

use anyhow::Result;
use colored::*;
use std::path::Path;

use super::{UserFields, UsersCommands, UsersSubcommand};
use crate::cli::ui::{self, confirm, finish, print_table, secret_or_prompt, with_spinner};
use crate::console::Choice;
use crate::console::pages::UsersPage;
use crate::context::AppContext;
use crate::models::{User, UserForm};

const HEADERS: &[&str] = &["ID", "PCO number", "Name", "Email", "Phone", "Role", "Status"];

pub async fn handle_users_command(ctx: AppContext, args: UsersCommands) -> Result<()> {
    let mut page = UsersPage::new(ctx);

    match args.command {
        UsersSubcommand::List {
            role,
            status,
            search,
            csv,
        } => {
            page.filter.search = search.unwrap_or_default();
            page.filter.role = role.map_or(Choice::All, Choice::Only);
            page.filter.status = status.map_or(Choice::All, Choice::Only);
            if !with_spinner("Loading users...", page.reload()).await {
                return finish(&mut page.notifications, false);
            }
            let rows: Vec<Vec<String>> = page.visible().into_iter().map(user_row).collect();
            println!();
            print_table(HEADERS, &rows);
            if let Some(path) = csv {
                export(&path, &rows)?;
            }
            finish(&mut page.notifications, true)
        }
        UsersSubcommand::Show { id } => {
            let user = with_spinner("Loading user...", page.fetch_user(id)).await;
            if let Some(user) = &user {
                print_user(user);
            }
            finish(&mut page.notifications, user.is_some())
        }
        UsersSubcommand::Add(fields) => {
            page.start_create();
            let password = secret_or_prompt(fields.password.clone(), "Password")?;
            if let Some(form) = page.modal.form_mut() {
                apply_fields(form, fields);
                form.password = Some(password);
            }
            let ok = with_spinner("Creating user...", page.submit()).await;
            finish(&mut page.notifications, ok)
        }
        UsersSubcommand::Update { id, fields } => {
            if !with_spinner("Loading users...", page.reload()).await || !page.start_edit(id) {
                return finish(&mut page.notifications, false);
            }
            if let Some(form) = page.modal.form_mut() {
                apply_fields(form, fields);
            }
            let ok = with_spinner("Updating user...", page.submit()).await;
            finish(&mut page.notifications, ok)
        }
        UsersSubcommand::Delete { id, yes } => {
            if !confirm(&format!("Delete user {}?", id), yes)? {
                println!("{} Cancelled.", "✗".bright_red().bold());
                return Ok(());
            }
            page.request_delete(id);
            let ok = with_spinner("Deleting user...", page.confirm_delete()).await;
            finish(&mut page.notifications, ok)
        }
    }
}

fn apply_fields(form: &mut UserForm, fields: UserFields) {
    if let Some(pco_number) = fields.pco_number {
        form.pco_number = pco_number;
    }
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(email) = fields.email {
        form.email = email;
    }
    if let Some(phone) = fields.phone {
        form.phone = phone;
    }
    if let Some(role) = fields.role {
        form.role = role;
    }
    if let Some(status) = fields.status {
        form.status = status;
    }
    if let Some(password) = fields.password.filter(|p| !p.is_empty()) {
        form.password = Some(password);
    }
}

fn user_row(user: &User) -> Vec<String> {
    vec![
        user.id.to_string(),
        user.pco_number.clone(),
        user.name.clone(),
        user.email.clone(),
        user.phone.clone(),
        user.role.to_string(),
        user.status.clone(),
    ]
}

fn print_user(user: &User) {
    println!();
    println!("  {} {}", user.name.bright_blue().bold(), format!("#{}", user.id).dimmed());
    println!("    {}: {}", "PCO number".dimmed(), user.pco_number);
    println!("    {}: {}", "Email".dimmed(), user.email.cyan());
    println!("    {}: {}", "Phone".dimmed(), user.phone);
    println!("    {}: {}", "Role".dimmed(), user.role);
    println!("    {}: {}", "Status".dimmed(), user.status);
    if let Some(created) = &user.created_at {
        println!("    {}: {}", "Created".dimmed(), created);
    }
}

fn export(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let written = ui::write_csv(path, HEADERS, rows)?;
    println!("  {} {} rows to {}", "Exported".bright_green(), written, path.display());
    Ok(())
}
