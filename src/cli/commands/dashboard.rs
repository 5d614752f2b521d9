//! Dashboard overview

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::cli::ui::{finish, print_table, status_badge, with_spinner};
use crate::console::pages::DashboardPage;
use crate::context::AppContext;

#[derive(Args)]
pub struct DashboardCommands {}

pub async fn dashboard_command(ctx: AppContext, _args: DashboardCommands) -> Result<()> {
    let mut page = DashboardPage::new(ctx);
    let ok = with_spinner("Loading dashboard...", page.load()).await;

    if let Some(stats) = &page.stats {
        println!();
        println!("  {}", "Operations overview".bright_blue().bold());
        println!("  {}", "═══════════════════".bright_blue());
        println!("    {}: {}", "Reports".dimmed(), stats.total_reports);
        println!("    {}: {}", "Pending review".dimmed(), stats.pending_reports.to_string().bright_yellow().bold());
        println!("    {}: {}", "Approved".dimmed(), stats.approved_reports.to_string().bright_green());
        println!("    {}: {}", "Declined".dimmed(), stats.declined_reports.to_string().bright_red());
        println!("    {}: {}", "Active PCOs".dimmed(), stats.active_pcos);
        println!("    {}: {}", "Clients".dimmed(), stats.total_clients);
        println!("    {}: {}", "Active chemicals".dimmed(), stats.active_chemicals);

        if !stats.recent_reports.is_empty() {
            println!();
            println!("  {}", "Recent reports".bright_white().bold());
            let rows: Vec<Vec<String>> = stats
                .recent_reports
                .iter()
                .map(|report| {
                    vec![
                        report.id.to_string(),
                        report.client_name.clone(),
                        report.pco_name.clone(),
                        status_badge(report.status).to_string(),
                        report.submitted_at.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print_table(&["ID", "Client", "PCO", "Status", "Submitted"], &rows);
        }
    }

    finish(&mut page.notifications, ok)
}
