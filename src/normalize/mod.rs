//! Coercion of inconsistent backend payloads into the canonical models,
//! and shaping of outgoing partial-update bodies.

pub mod lists;
pub mod payload;
pub mod report;

pub use lists::normalize_string_list;
pub use payload::{clean_payload, report_edit_payload};
pub use report::{
    normalize_chemical_usage, normalize_detailed_report, normalize_station, normalize_stations,
    normalize_treatment, normalize_treatments,
};
