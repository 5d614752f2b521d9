//! Review notes attached to reports

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::cli::ui::{confirm, finish, print_table, with_spinner};
use crate::console::pages::ReportView;
use crate::context::AppContext;

#[derive(Args)]
pub struct NotesCommands {
    #[command(subcommand)]
    pub command: NotesSubcommand,
}

#[derive(Subcommand)]
pub enum NotesSubcommand {
    /// List the notes on a report
    List { report_id: u64 },
    /// Add a note to a report
    Add {
        report_id: u64,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a note
    Delete {
        report_id: u64,
        note_id: u64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn notes_command(ctx: AppContext, args: NotesCommands) -> Result<()> {
    match args.command {
        NotesSubcommand::List { report_id } => {
            let mut view = ReportView::new(ctx, report_id);
            with_spinner("Loading notes...", view.load_notes()).await;
            let rows: Vec<Vec<String>> = view
                .notes
                .iter()
                .map(|note| {
                    vec![
                        note.id.to_string(),
                        note.created_at.clone().unwrap_or_default(),
                        note.author.clone(),
                        note.content.clone(),
                    ]
                })
                .collect();
            println!();
            print_table(&["ID", "Created", "Author", "Note"], &rows);
            finish(&mut view.notifications, true)
        }
        NotesSubcommand::Add { report_id, text } => {
            let mut view = ReportView::new(ctx, report_id);
            view.note_draft = text.join(" ");
            let ok = with_spinner("Adding note...", view.add_note()).await;
            finish(&mut view.notifications, ok)
        }
        NotesSubcommand::Delete {
            report_id,
            note_id,
            yes,
        } => {
            if !confirm(&format!("Delete note {}?", note_id), yes)? {
                println!("{} Cancelled.", "✗".bright_red().bold());
                return Ok(());
            }
            let mut view = ReportView::new(ctx, report_id);
            let ok = with_spinner("Deleting note...", view.delete_note(note_id)).await;
            finish(&mut view.notifications, ok)
        }
    }
}
