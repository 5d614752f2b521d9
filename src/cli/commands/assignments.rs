//! Client ↔ PCO assignment records

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::api::AssignmentQuery;
use crate::cli::ui::{self, confirm, finish, print_table, with_spinner};
use crate::console::{ListController, Notifications};
use crate::context::AppContext;
use crate::models::Assignment;

const HEADERS: &[&str] = &["ID", "Client", "PCO", "Assigned by", "Assigned at", "Status"];

#[derive(Args)]
pub struct AssignmentsCommands {
    #[command(subcommand)]
    pub command: AssignmentsSubcommand,
}

#[derive(Subcommand)]
pub enum AssignmentsSubcommand {
    /// List assignment records
    List {
        #[arg(long = "client")]
        client_id: Option<u64>,
        #[arg(long = "pco")]
        pco_id: Option<u64>,
        #[arg(long, help = "Also export the list to a CSV file")]
        csv: Option<PathBuf>,
    },
    /// Delete one assignment record
    Delete {
        id: u64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn assignments_command(ctx: AppContext, args: AssignmentsCommands) -> Result<()> {
    let mut notifications = Notifications::new();

    match args.command {
        AssignmentsSubcommand::List {
            client_id,
            pco_id,
            csv,
        } => {
            let query = AssignmentQuery { client_id, pco_id };
            let mut list: ListController<Assignment> = ListController::new();
            let loaded = with_spinner(
                "Loading assignments...",
                list.load(ctx.service.get_assignments(&query), &mut notifications),
            )
            .await;
            if !loaded {
                return finish(&mut notifications, false);
            }

            let rows: Vec<Vec<String>> = list.items().iter().map(assignment_row).collect();
            println!();
            print_table(HEADERS, &rows);
            if let Some(path) = csv {
                let written = ui::write_csv(&path, HEADERS, &rows)?;
                println!("  {} {} rows to {}", "Exported".bright_green(), written, path.display());
            }
            finish(&mut notifications, true)
        }
        AssignmentsSubcommand::Delete { id, yes } => {
            if !confirm(&format!("Delete assignment {}?", id), yes)? {
                println!("{} Cancelled.", "✗".bright_red().bold());
                return Ok(());
            }
            let outcome = with_spinner("Deleting assignment...", ctx.service.delete_assignment(id)).await;
            let ok = notifications.settle(outcome, "Assignment deleted");
            finish(&mut notifications, ok)
        }
    }
}

fn assignment_row(assignment: &Assignment) -> Vec<String> {
    vec![
        assignment.id.to_string(),
        format!("{} (#{})", assignment.client_name, assignment.client_id),
        format!("{} (#{})", assignment.pco_name, assignment.pco_id),
        assignment.assigned_by.map(|id| id.to_string()).unwrap_or_default(),
        assignment.assigned_at.clone().unwrap_or_default(),
        assignment.status.clone(),
    ]
}
