//! Records mirrored from the backend
//!
//! These are plain data types. The only behaviour they carry is the small
//! set of rules the console enforces on its own side (delete guards, tab
//! visibility, required form fields).

pub mod assignment;
pub mod chemical;
pub mod client;
pub mod dashboard;
pub mod fumigation;
pub mod lenient;
pub mod note;
pub mod pagination;
pub mod report;
pub mod station;
pub mod user;

pub use assignment::{Assignment, AssignmentAction, AssignmentRequest};
pub use chemical::{Chemical, ChemicalCategory, ChemicalForm, DeleteDenied};
pub use client::{AssignedPco, Client, ClientContact, ClientForm};
pub use dashboard::DashboardStats;
pub use fumigation::{ChemicalUsage, FumigationTreatment};
pub use note::Note;
pub use pagination::{Paginated, Pagination};
pub use report::{DetailedReport, ReportStatus, ReportSummary, ReportType};
pub use station::{BaitStatus, InspectionStation, StationLocation};
pub use user::{CurrentUser, User, UserForm, UserRole};
