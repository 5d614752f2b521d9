pub mod chemicals;
pub mod clients;
pub mod dashboard;
pub mod report_edit;
pub mod report_view;
pub mod reports;
pub mod users;

pub use chemicals::{ChemicalFilter, ChemicalsPage};
pub use clients::{ClientFilter, ClientsPage};
pub use dashboard::DashboardPage;
pub use report_edit::ReportEditor;
pub use report_view::ReportView;
pub use reports::{ReportsPage, ReviewAction, ReviewDialog};
pub use users::{UserFilter, UsersPage};
