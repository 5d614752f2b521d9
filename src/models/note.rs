use super::lenient;
use serde::{Deserialize, Serialize};

/// Admin note attached to a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Note {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub id: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub report_id: u64,
    #[serde(alias = "note", deserialize_with = "lenient::string_or_empty", default)]
    pub content: String,
    #[serde(alias = "created_by_name", deserialize_with = "lenient::string_or_empty", default)]
    pub author: String,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub created_at: Option<String>,
}
