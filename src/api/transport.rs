//! Request description and the transport seam
//!
//! Services describe calls as [`ApiRequest`] values and hand them to a
//! [`Transport`]. The reqwest-backed implementation lives in
//! [`super::client`]; tests plug in an in-memory one.

use super::envelope::ApiResponse;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single REST call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/admin/reports/4`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Overrides the transport's default timeout
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present and non-empty
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()).filter(|v| !v.trim().is_empty()) {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Path plus encoded query string, used for logging and request matching
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }

    /// Short label for log lines, e.g. `reports` for `/admin/reports/4/status`
    pub fn resource(&self) -> &str {
        self.path
            .trim_start_matches('/')
            .split('/')
            .find(|segment| !segment.is_empty() && *segment != "admin")
            .unwrap_or("root")
    }
}

/// Executes [`ApiRequest`]s against the backend.
///
/// `send` fails only on transport problems (connection, timeout, a body
/// that is not an envelope). A well-formed `success: false` envelope is a
/// normal return value.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> anyhow::Result<ApiResponse>;

    /// Fetch a binary body (PDF downloads)
    async fn download(&self, request: ApiRequest) -> anyhow::Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_building() {
        let request = ApiRequest::get("/admin/reports")
            .param("page", 2)
            .param_opt("status", Some("pending"))
            .param_opt::<&str>("search", None)
            .param_opt("pco_id", Some(""))
            .param("search", "a&b");

        assert_eq!(
            request.path_and_query(),
            "/admin/reports?page=2&status=pending&search=a%26b"
        );
        assert_eq!(request.resource(), "reports");
    }
}
