pub mod assignments;
pub mod chemicals;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod notes;
pub mod reports;
pub mod users;

pub use assignments::{AssignmentsCommands, assignments_command};
pub use chemicals::{ChemicalsCommands, handle_chemicals_command};
pub use clients::{ClientsCommands, handle_clients_command};
pub use config::{ConfigCommands, config_command};
pub use dashboard::{DashboardCommands, dashboard_command};
pub use notes::{NotesCommands, notes_command};
pub use reports::{ReportsCommands, handle_reports_command};
pub use users::{UsersCommands, handle_users_command};
