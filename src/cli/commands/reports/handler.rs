//! Report command handler

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use super::{ReportEditArgs, ReportListArgs, ReportsCommands, ReportsSubcommand};
use crate::api::{EmailRequest, ReportFilters};
use crate::cli::ui::{self, confirm, finish, print_table, status_badge, text_or_prompt, with_spinner};
use crate::console::pages::{ReportEditor, ReportView, ReportsPage};
use crate::context::AppContext;
use crate::models::{DetailedReport, ReportStatus, ReportSummary};

const LIST_HEADERS: &[&str] = &["ID", "Type", "Status", "Client", "PCO", "Service date", "Submitted"];

pub async fn handle_reports_command(ctx: AppContext, args: ReportsCommands) -> Result<()> {
    match args.command {
        ReportsSubcommand::List(list_args) => list_reports(ctx, list_args).await,
        ReportsSubcommand::Show { id } => show_report(ctx, id).await,
        ReportsSubcommand::Approve { id, notes } => review(ctx, id, Review::Approve, notes).await,
        ReportsSubcommand::Decline { id, notes } => {
            let notes = text_or_prompt(notes, "Reason for declining")?;
            review(ctx, id, Review::Decline, Some(notes)).await
        }
        ReportsSubcommand::Status { id, status, notes } => {
            review(ctx, id, Review::Status(status), notes).await
        }
        ReportsSubcommand::Edit(edit_args) => edit_report(ctx, edit_args).await,
        ReportsSubcommand::Download { id, output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(format!("report-{}.pdf", id)));
            let mut view = ReportView::new(ctx, id);
            let ok = with_spinner("Downloading PDF...", view.download_pdf(&path)).await;
            finish(&mut view.notifications, ok)
        }
        ReportsSubcommand::Email {
            id,
            recipients,
            subject,
            message,
        } => {
            let mut view = ReportView::new(ctx, id);
            let request = EmailRequest {
                recipients,
                subject,
                message,
            };
            let ok = with_spinner("Sending email...", view.email(&request)).await;
            finish(&mut view.notifications, ok)
        }
        ReportsSubcommand::Bulk {
            action,
            ids,
            notes,
            yes,
        } => {
            let prompt = format!("Run '{}' on {} report(s)?", action, ids.len());
            if !confirm(&prompt, yes)? {
                println!("{} Cancelled.", "✗".bright_red().bold());
                return Ok(());
            }
            let mut page = ReportsPage::new(ctx);
            let ok = with_spinner("Running bulk operation...", page.bulk(&action, ids, notes)).await;
            finish(&mut page.notifications, ok)
        }
    }
}

fn summary_row(report: &ReportSummary) -> Vec<String> {
    vec![
        report.id.to_string(),
        report.report_type.to_string(),
        status_badge(report.status).to_string(),
        report.client_name.clone(),
        format!("{} {}", report.pco_name, report.pco_number).trim().to_string(),
        report.service_date.clone().unwrap_or_default(),
        report.submitted_at.clone().unwrap_or_default(),
    ]
}

async fn list_reports(ctx: AppContext, args: ReportListArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.page_size);
    let mut page = ReportsPage::new(ctx);
    let filters = ReportFilters {
        status: args.status,
        report_type: args.report_type,
        pco_id: args.pco_id,
        client_id: args.client_id,
        search: args.search,
        date_from: args.from,
        date_to: args.to,
        page: args.page,
        limit,
    };
    page.filters = filters;

    let ok = with_spinner("Loading reports...", page.reload()).await;
    if !ok {
        return finish(&mut page.notifications, ok);
    }

    let rows: Vec<Vec<String>> = page.list.items().iter().map(summary_row).collect();
    println!();
    print_table(LIST_HEADERS, &rows);
    if let Some(pagination) = page.list.pagination() {
        println!();
        println!(
            "  {} {} of {} ({} reports)",
            "Page".dimmed(),
            pagination.current_page,
            pagination.total_pages.max(1),
            pagination.total_records
        );
    }

    if let Some(path) = args.csv {
        let plain: Vec<Vec<String>> = page
            .list
            .items()
            .iter()
            .map(|report| {
                let mut row = summary_row(report);
                row[2] = report.status.to_string();
                row
            })
            .collect();
        let written = ui::write_csv(&path, LIST_HEADERS, &plain)?;
        println!("  {} {} rows to {}", "Exported".bright_green(), written, path.display());
    }
    finish(&mut page.notifications, true)
}

async fn show_report(ctx: AppContext, id: u64) -> Result<()> {
    let mut view = ReportView::new(ctx, id);
    let ok = with_spinner("Loading report...", view.load()).await;
    if let Some(report) = view.report.as_ref() {
        print_report(report);
        if !view.notes.is_empty() {
            println!();
            println!("  {}", "Notes".bright_white().bold());
            for note in &view.notes {
                println!(
                    "    [{}] {} {}: {}",
                    note.id,
                    note.created_at.as_deref().unwrap_or("").dimmed(),
                    note.author.cyan(),
                    note.content
                );
            }
        }
    }
    finish(&mut view.notifications, ok)
}

fn print_report(report: &DetailedReport) {
    println!();
    println!(
        "  {} {} {}",
        format!("Report #{}", report.id).bright_blue().bold(),
        report.report_type.to_string().cyan(),
        status_badge(report.status)
    );
    println!("    {}: {}", "Client".dimmed(), report.client_name);
    if !report.client_address.is_empty() {
        println!("    {}: {}", "Address".dimmed(), report.client_address);
    }
    println!("    {}: {} {}", "PCO".dimmed(), report.pco_name, report.pco_number.dimmed());
    println!(
        "    {}: {}   {}: {}",
        "Service".dimmed(),
        report.service_date.as_deref().unwrap_or("-"),
        "Next".dimmed(),
        report.next_service_date.as_deref().unwrap_or("-")
    );
    for (label, text) in [
        ("Remarks", &report.general_remarks),
        ("Recommendations", &report.recommendations),
        ("Admin notes", &report.admin_notes),
    ] {
        if !text.is_empty() {
            println!("    {}: {}", label.dimmed(), text);
        }
    }

    if report.show_stations_tab() {
        println!();
        println!(
            "  {} ({} need attention)",
            "Stations".bright_white().bold(),
            report.stations_needing_attention()
        );
        let rows: Vec<Vec<String>> = report
            .stations
            .iter()
            .map(|station| {
                vec![
                    station.station_number.to_string(),
                    station.location.as_str().to_string(),
                    if station.is_accessible { "yes".into() } else { format!("no ({})", station.access_reason) },
                    if station.activity_detected { station.activity_type.clone() } else { "-".into() },
                    station.bait_status.to_string(),
                    station.station_condition.join(", "),
                    station.chemical_name.clone(),
                    station.quantity.map(|q| q.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        print_table(
            &["No", "Location", "Accessible", "Activity", "Bait", "Condition", "Chemical", "Qty"],
            &rows,
        );
    }

    if report.show_fumigation_tab() {
        println!();
        println!("  {}", "Fumigation".bright_white().bold());
        if report.fumigation.is_empty() {
            println!("    {}", "No treatments recorded".dimmed());
        }
        for (i, treatment) in report.fumigation.iter().enumerate() {
            println!("    {} {}", "Treatment".dimmed(), i + 1);
            println!("      {}: {}", "Areas".dimmed(), treatment.treated_areas.join(", "));
            println!("      {}: {}", "Pests".dimmed(), treatment.treated_for.join(", "));
            println!("      {}: {}", "Monitor replaced".dimmed(), treatment.monitor_replaced);
            for usage in &treatment.chemicals {
                println!(
                    "      - {} {} {}",
                    usage.chemical_name,
                    usage.quantity,
                    usage.batch_number.dimmed()
                );
            }
            for (chemical_id, total) in treatment.chemical_totals() {
                println!("      {} #{}: {}", "Total chemical".dimmed(), chemical_id, total);
            }
            if !treatment.remarks.is_empty() {
                println!("      {}: {}", "Remarks".dimmed(), treatment.remarks);
            }
        }
    }
}

enum Review {
    Approve,
    Decline,
    Status(ReportStatus),
}

async fn review(ctx: AppContext, id: u64, review: Review, notes: Option<String>) -> Result<()> {
    let mut page = ReportsPage::new(ctx);
    let opened = match review {
        Review::Approve => page.start_approve(id),
        Review::Decline => page.start_decline(id),
        Review::Status(status) => page.start_status_change(id, status),
    };
    if !opened {
        return finish(&mut page.notifications, false);
    }

    if let Some(notes) = notes {
        page.set_review_notes(notes);
    }
    let ok = with_spinner("Updating status...", page.submit_review()).await;
    finish(&mut page.notifications, ok)
}

async fn edit_report(ctx: AppContext, args: ReportEditArgs) -> Result<()> {
    let mut editor = ReportEditor::new(ctx, args.id);
    if !with_spinner("Loading report...", editor.load()).await {
        return finish(&mut editor.notifications, false);
    }

    if let Some(report_type) = args.report_type {
        editor.set_report_type(report_type);
    }
    editor.update(|draft| {
        if let Some(date) = args.service_date {
            draft.service_date = Some(date);
        }
        if let Some(date) = args.next_service_date {
            draft.next_service_date = Some(date);
        }
        if let Some(remarks) = args.remarks {
            draft.general_remarks = remarks;
        }
        if let Some(recommendations) = args.recommendations {
            draft.recommendations = recommendations;
        }
    });

    for number in &args.remove_station {
        let index = editor
            .draft()
            .and_then(|draft| draft.stations.iter().position(|s| s.station_number == *number));
        match index {
            Some(index) => {
                editor.remove_station(index);
            }
            None => editor.notifications.error(format!("Station {} not found", number)),
        }
    }
    for location in &args.add_station {
        if !editor.show_stations_tab() {
            editor.notifications.error("This report type has no stations");
            break;
        }
        editor.add_station((*location).into());
    }

    let mut positions = args.remove_treatment.clone();
    positions.sort_unstable_by(|a, b| b.cmp(a));
    for position in positions {
        if position == 0 || !editor.remove_treatment(position - 1) {
            editor.notifications.error(format!("Treatment {} not found", position));
        }
    }
    if args.add_treatment {
        if editor.show_fumigation_tab() {
            editor.add_treatment();
        } else {
            editor.notifications.error("This report type has no fumigation treatments");
        }
    }

    if editor.notifications.has_errors() {
        return finish(&mut editor.notifications, false);
    }

    if args.dry_run {
        let payload = editor.payload().unwrap_or_default();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return finish(&mut editor.notifications, true);
    }

    if !editor.has_changes() {
        println!("{} No changes to save", "i".bright_blue().bold());
        return Ok(());
    }
    let ok = with_spinner("Saving report...", editor.save()).await;
    finish(&mut editor.notifications, ok)
}
