//! API constants and endpoint paths for the pest-control backend

use std::time::Duration;

/// Default request timeout for ordinary calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The detailed report endpoint is slow on large reports; it gets its own deadline
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with every request
pub const USER_AGENT: &str = "pco-admin/0.1";

/// Standard headers
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Accept header for PDF downloads
    pub const ACCEPT_PDF: &str = "application/pdf";

    /// Correlation id echoed into the backend logs
    pub const X_CORRELATION_ID: &str = "X-Correlation-Id";
}

/// Resource paths, relative to the configured API base URL
pub mod paths {
    pub const DASHBOARD: &str = "/admin/dashboard";
    pub const REPORTS: &str = "/admin/reports";
    pub const REPORTS_BULK: &str = "/admin/reports/bulk";
    pub const USERS: &str = "/users";
    pub const CLIENTS: &str = "/clients";
    pub const CHEMICALS: &str = "/chemicals";
    pub const ASSIGNMENTS: &str = "/assignments";
    pub const NOTES: &str = "/notes";

    pub fn report(id: u64) -> String {
        format!("{}/{}", REPORTS, id)
    }

    pub fn report_status(id: u64) -> String {
        format!("{}/{}/status", REPORTS, id)
    }

    pub fn report_download(id: u64) -> String {
        format!("{}/{}/download", REPORTS, id)
    }

    pub fn report_email(id: u64) -> String {
        format!("{}/{}/email", REPORTS, id)
    }

    pub fn user(id: u64) -> String {
        format!("{}/{}", USERS, id)
    }

    pub fn client(id: u64) -> String {
        format!("{}/{}", CLIENTS, id)
    }

    pub fn chemical(id: u64) -> String {
        format!("{}/{}", CHEMICALS, id)
    }

    pub fn chemical_status(id: u64) -> String {
        format!("{}/{}/status", CHEMICALS, id)
    }

    pub fn chemical_permanent(id: u64) -> String {
        format!("{}/{}/permanent", CHEMICALS, id)
    }

    pub fn assignment(id: u64) -> String {
        format!("{}/{}", ASSIGNMENTS, id)
    }

    pub fn note(id: u64) -> String {
        format!("{}/{}", NOTES, id)
    }
}

/// Join the base URL and a resource path without doubling slashes
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(endpoint("https://api.example.com/v1/", "/users"), "https://api.example.com/v1/users");
        assert_eq!(endpoint("https://api.example.com", paths::report(5).as_str()), "https://api.example.com/admin/reports/5");
    }
}
