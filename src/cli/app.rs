use super::commands::{
    AssignmentsCommands, ChemicalsCommands, ClientsCommands, ConfigCommands, DashboardCommands,
    NotesCommands, ReportsCommands, UsersCommands,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pco-admin")]
#[command(about = "Admin console for pest-control operations: reports, PCOs, clients and chemicals")]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report counts and recent submissions
    Dashboard(DashboardCommands),
    /// Review, edit and export inspection/fumigation reports
    Reports(ReportsCommands),
    /// Manage admins and PCOs
    Users(UsersCommands),
    /// Manage clients and their PCO assignments
    Clients(ClientsCommands),
    /// Manage the chemical inventory
    Chemicals(ChemicalsCommands),
    /// Inspect and remove assignment records
    Assignments(AssignmentsCommands),
    /// Review notes on reports
    Notes(NotesCommands),
    /// Connection and identity settings
    Config(ConfigCommands),
}
