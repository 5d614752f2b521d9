//! Admin service layer
//!
//! One method per backend operation, split by resource. Methods return the
//! backend envelope with `data` decoded into the model types; `success:
//! false` is left for the caller to present. Nothing here retries or caches.

mod assignments;
mod chemicals;
mod clients;
mod dashboard;
mod notes;
mod reports;
mod users;

pub use chemicals::ChemicalQuery;
pub use clients::{ClientQuery, client_from_row};
pub use reports::{BulkOperation, EmailRequest, ReportFilters};
pub use users::UserQuery;
pub use assignments::AssignmentQuery;

use super::constants;
use super::envelope::ApiResponse;
use super::transport::{ApiRequest, Transport};
use crate::models::Pagination;
use crate::models::lenient::canonicalize;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AdminService {
    transport: Arc<dyn Transport>,
    report_timeout: Duration,
}

impl AdminService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            report_timeout: constants::REPORT_TIMEOUT,
        }
    }

    /// Timeout for the detailed report fetch, which is slower than the rest
    pub fn with_report_timeout(mut self, timeout: Duration) -> Self {
        self.report_timeout = timeout;
        self
    }

    pub fn from_transport<T: Transport + 'static>(transport: T) -> Self {
        Self::new(Arc::new(transport))
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.send(request).await
    }

    async fn send_typed<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<ApiResponse<T>> {
        self.send(request).await?.decode()
    }
}

/// Rows of a list payload: a bare array or an array under `key`
pub(crate) fn rows_of(data: Value, key: &str) -> Vec<Value> {
    match data {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Pull a record list out of `data`, which is either a bare array or an
/// object holding the array under one of `keys` next to `pagination`.
pub(crate) fn extract_list<T: DeserializeOwned>(
    data: Value,
    keys: &[&str],
) -> Result<(Vec<T>, Option<Pagination>)> {
    let (items, pagination) = match data {
        Value::Array(_) => (data, None),
        Value::Object(mut map) => {
            let pagination = match map.remove("pagination") {
                Some(Value::Object(mut raw)) => {
                    canonicalize(&mut raw, "current_page", &["page"]);
                    canonicalize(&mut raw, "per_page", &["limit"]);
                    canonicalize(&mut raw, "total_records", &["total"]);
                    Some(
                        serde_json::from_value::<Pagination>(Value::Object(raw))
                            .context("Failed to decode pagination")?,
                    )
                }
                _ => None,
            };
            let items = keys
                .iter()
                .find_map(|key| map.remove(*key))
                .unwrap_or(Value::Array(Vec::new()));
            (items, pagination)
        }
        Value::Null => (Value::Array(Vec::new()), None),
        other => anyhow::bail!("Expected a list payload, got {}", other),
    };

    let items = serde_json::from_value(items).context("Failed to decode list items")?;
    Ok((items, pagination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use serde_json::json;

    #[test]
    fn test_extract_list_shapes() {
        let (users, pagination): (Vec<User>, _) =
            extract_list(json!([{"id": 1, "name": "A"}]), &["users"]).unwrap();
        assert_eq!(users.len(), 1);
        assert!(pagination.is_none());

        let (users, pagination): (Vec<User>, _) = extract_list(
            json!({"users": [{"id": 1}, {"id": "2"}], "pagination": {"page": 1, "limit": 20, "total": 2, "total_pages": 1}}),
            &["users", "data"],
        )
        .unwrap();
        assert_eq!(users[1].id, 2);
        assert_eq!(pagination.unwrap().total_records, 2);

        let (users, _): (Vec<User>, _) = extract_list(json!(null), &["users"]).unwrap();
        assert!(users.is_empty());
    }
}
