//! Page controllers
//!
//! Each page owns its list, dialog and toast state and talks to the backend
//! only through [`crate::context::AppContext`]. Errors never escape an
//! action: they end up as toasts and the action returns `false`.

pub mod filter;
pub mod list;
pub mod modal;
pub mod notify;
pub mod pages;

pub use filter::{Choice, Searchable, filter_items};
pub use list::ListController;
pub use modal::Modal;
pub use notify::{Notifications, Toast, ToastKind};

/// Toast text for a form with blank required fields
pub(crate) fn missing_fields_message(missing: &[&str]) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    let fields = missing
        .iter()
        .map(|field| field.replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("Please fill in: {}", fields))
}
