//! Structured request logging with correlation ids
//!
//! Every backend call gets a correlation id that is sent as a header and
//! appears on each JSON log line, so a console action can be matched
//! against the backend access log.

use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use log::{debug, error, info, warn};

/// What the logger emits
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log request and response headers (sanitized)
    pub request_logging: bool,
    /// Requests slower than this get a warning
    pub slow_request_threshold: Duration,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            request_logging: true,
            slow_request_threshold: Duration::from_secs(5),
        }
    }
}

/// Structured logger for API calls
#[derive(Debug, Clone, Default)]
pub struct ApiLogger {
    config: LoggingConfig,
}

/// Per-request tracking state
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: String,
    pub method: String,
    pub resource: String,
    pub path: String,
    pub start_time: Instant,
}

impl RequestContext {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl ApiLogger {
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Start tracking a request with a fresh correlation id
    pub fn start_request(&self, method: &str, resource: &str, path: &str) -> RequestContext {
        let context = RequestContext {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            method: method.to_string(),
            resource: resource.to_string(),
            path: path.to_string(),
            start_time: Instant::now(),
        };

        let log_data = json!({
            "event": "request_started",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "resource": context.resource,
            "path": context.path,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        info!("API Request Started: {}", log_data);

        context
    }

    pub fn log_request(&self, context: &RequestContext, headers: &HashMap<String, String>) {
        if !self.config.request_logging {
            return;
        }

        let log_data = json!({
            "event": "http_request",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "path": context.path,
            "headers": sanitize_headers(headers),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        debug!("HTTP Request: {}", log_data);
    }

    pub fn log_response(&self, context: &RequestContext, status_code: u16, duration: Duration) {
        if !self.config.request_logging {
            return;
        }

        let log_data = json!({
            "event": "http_response",
            "correlation_id": context.correlation_id,
            "resource": context.resource,
            "status_code": status_code,
            "duration_ms": duration.as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if status_code >= 400 {
            warn!("HTTP Response (Error): {}", log_data);
        } else {
            debug!("HTTP Response: {}", log_data);
        }
    }

    /// Record the outcome of a request once the envelope has been read
    pub fn complete_request(
        &self,
        context: &RequestContext,
        success: bool,
        status_code: Option<u16>,
        error_message: Option<&str>,
    ) {
        let duration = context.elapsed();
        let log_data = json!({
            "event": "request_completed",
            "correlation_id": context.correlation_id,
            "method": context.method,
            "resource": context.resource,
            "duration_ms": duration.as_millis(),
            "success": success,
            "status_code": status_code,
            "error_message": error_message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if success {
            info!("API Request Completed: {}", log_data);
        } else {
            error!("API Request Failed: {}", log_data);
        }

        if duration > self.config.slow_request_threshold {
            warn!(
                "Slow request {} {} took {}ms (threshold {}ms)",
                context.method,
                context.path,
                duration.as_millis(),
                self.config.slow_request_threshold.as_millis()
            );
        }
    }
}

/// Replace credential-bearing header values
fn sanitize_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(key, value)| {
            let key_lower = key.to_lowercase();
            if key_lower.contains("authorization") || key_lower.contains("token") || key_lower.contains("key") {
                (key.clone(), "[REDACTED]".to_string())
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_creation() {
        let logger = ApiLogger::default();
        let context = logger.start_request("GET", "reports", "/admin/reports");

        assert_eq!(context.method, "GET");
        assert_eq!(context.resource, "reports");
        assert_eq!(context.correlation_id.len(), 36);
    }

    #[test]
    fn test_header_sanitization() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer secret-token".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("X-API-Key".to_string(), "secret-key".to_string());

        let sanitized = sanitize_headers(&headers);

        assert_eq!(sanitized.get("Authorization"), Some(&"[REDACTED]".to_string()));
        assert_eq!(sanitized.get("Content-Type"), Some(&"application/json".to_string()));
        assert_eq!(sanitized.get("X-API-Key"), Some(&"[REDACTED]".to_string()));
    }
}
