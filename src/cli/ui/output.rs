//! Terminal rendering: tables, badges, toasts and CSV export

use crate::console::{Notifications, ToastKind};
use crate::models::ReportStatus;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

pub fn status_badge(status: ReportStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        ReportStatus::Draft => label.dimmed(),
        ReportStatus::Pending => label.bright_yellow().bold(),
        ReportStatus::Approved => label.bright_green().bold(),
        ReportStatus::Declined => label.bright_red().bold(),
        ReportStatus::Archived => label.white(),
    }
}

pub fn active_badge(active: bool) -> ColoredString {
    if active {
        "active".bright_green()
    } else {
        "inactive".dimmed()
    }
}

/// Print rows as left-aligned columns under a bold header
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("  {}", "No records found".dimmed());
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(visible_width(cell));
            }
        }
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("  {}", header_line.bright_white().bold());

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", line);
    }
}

/// Width of a cell ignoring ANSI colour codes
fn visible_width(cell: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for ch in cell.chars() {
        match (in_escape, ch) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

fn pad(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(cell));
    format!("{}{}", cell, " ".repeat(padding))
}

/// Write rows to a CSV file, returning how many records were written
pub fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(rows.len())
}

/// Print the toasts an action raised; a failed action becomes an error
pub fn finish(notifications: &mut Notifications, ok: bool) -> Result<()> {
    let mut errors = Vec::new();
    for toast in notifications.drain() {
        match toast.kind {
            ToastKind::Success => println!("{} {}", "✓".bright_green().bold(), toast.message),
            ToastKind::Info => println!("{} {}", "i".bright_blue().bold(), toast.message),
            ToastKind::Error if ok => eprintln!("{} {}", "!".bright_yellow().bold(), toast.message),
            ToastKind::Error => errors.push(toast.message),
        }
    }

    if !ok {
        if errors.is_empty() {
            anyhow::bail!("Action did not complete");
        }
        anyhow::bail!("{}", errors.join("; "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_width_ignores_colour() {
        colored::control::set_override(true);
        let badge = status_badge(ReportStatus::Approved).to_string();
        assert_eq!(visible_width(&badge), "approved".len());
        assert_eq!(pad("ab", 4), "ab  ");
    }

    #[test]
    fn test_finish_turns_failure_into_error() {
        let mut notifications = Notifications::new();
        notifications.error("Email already exists");
        let err = finish(&mut notifications, false).unwrap_err();
        assert_eq!(err.to_string(), "Email already exists");

        notifications.success("Saved");
        assert!(finish(&mut notifications, true).is_ok());
    }
}
