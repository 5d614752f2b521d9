use super::constants::{self, headers};
use super::envelope::ApiResponse;
use super::logging::{ApiLogger, LoggingConfig, RequestContext};
use super::transport::{ApiRequest, Method, Transport};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Longest slice of a non-JSON error body quoted back to the user
const ERROR_BODY_PREVIEW: usize = 200;

/// reqwest-backed transport for the pest-control REST API
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
    api_token: Option<String>,
    logger: ApiLogger,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .connect_timeout(constants::CONNECT_TIMEOUT)
            .user_agent(constants::USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(base_url, api_token, http_client))
    }

    /// Create a transport around an already configured reqwest client
    pub fn with_custom_client(
        base_url: impl Into<String>,
        api_token: Option<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            logger: ApiLogger::new(LoggingConfig::default()),
        }
    }

    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logger = ApiLogger::new(config);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, request: &ApiRequest, context: &RequestContext, accept: &str) -> reqwest::RequestBuilder {
        let url = constants::endpoint(&self.base_url, &request.path);

        let mut builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
            Method::Put => self.http_client.put(&url),
            Method::Delete => self.http_client.delete(&url),
        };

        builder = builder
            .header("Accept", accept)
            .header(headers::X_CORRELATION_ID, &context.correlation_id);

        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let mut logged_headers = HashMap::new();
        logged_headers.insert("Accept".to_string(), accept.to_string());
        logged_headers.insert(headers::X_CORRELATION_ID.to_string(), context.correlation_id.clone());
        if self.api_token.is_some() {
            logged_headers.insert("Authorization".to_string(), "Bearer".to_string());
        }
        self.logger.log_request(context, &logged_headers);

        builder
    }

    async fn execute(&self, request: &ApiRequest, context: &RequestContext, accept: &str) -> Result<reqwest::Response> {
        let response = self
            .build_request(request, context, accept)
            .send()
            .await
            .with_context(|| format!("{} {} failed", request.method, request.path))?;

        self.logger
            .log_response(context, response.status().as_u16(), context.elapsed());
        Ok(response)
    }
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_BODY_PREVIEW {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(ERROR_BODY_PREVIEW).collect();
    format!("{}...", cut)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let context = self.logger.start_request(
            request.method.as_str(),
            request.resource(),
            &request.path_and_query(),
        );

        let response = match self.execute(&request, &context, headers::CONTENT_TYPE_JSON).await {
            Ok(response) => response,
            Err(e) => {
                self.logger.complete_request(&context, false, None, Some(&e.to_string()));
                return Err(e);
            }
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", request.path))?;

        if text.trim().is_empty() {
            self.logger
                .complete_request(&context, status.is_success(), Some(status.as_u16()), None);
            if status.is_success() {
                return Ok(ApiResponse {
                    success: true,
                    data: None,
                    message: None,
                    errors: None,
                });
            }
            anyhow::bail!("HTTP {} from {} with an empty body", status.as_u16(), request.path);
        }

        match serde_json::from_str::<ApiResponse>(&text) {
            Ok(mut envelope) => {
                // Error statuses are failures even if the body forgot to say so
                if !status.is_success() {
                    envelope.success = false;
                }
                let message = (!envelope.success).then(|| envelope.error_message());
                self.logger.complete_request(
                    &context,
                    envelope.success,
                    Some(status.as_u16()),
                    message.as_deref(),
                );
                Ok(envelope)
            }
            Err(e) => {
                self.logger
                    .complete_request(&context, false, Some(status.as_u16()), Some(&e.to_string()));
                if status.is_success() {
                    anyhow::bail!(
                        "Unexpected response from {}: {} ({})",
                        request.path,
                        preview(&text),
                        e
                    );
                }
                anyhow::bail!("HTTP {} from {}: {}", status.as_u16(), request.path, preview(&text))
            }
        }
    }

    async fn download(&self, request: ApiRequest) -> Result<Vec<u8>> {
        let context = self.logger.start_request(
            request.method.as_str(),
            request.resource(),
            &request.path_and_query(),
        );

        let response = self.execute(&request, &context, headers::ACCEPT_PDF).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiResponse>(&text)
                .map(|envelope| envelope.error_message())
                .unwrap_or_else(|_| preview(&text));
            self.logger
                .complete_request(&context, false, Some(status.as_u16()), Some(&message));
            anyhow::bail!("Download failed (HTTP {}): {}", status.as_u16(), message);
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read download body from {}", request.path))?;
        self.logger
            .complete_request(&context, true, Some(status.as_u16()), None);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_ignored() {
        let transport = HttpTransport::new("http://localhost:8080/api", Some("  ".to_string()), Duration::from_secs(5)).unwrap();
        assert!(transport.api_token.is_none());
        assert_eq!(transport.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_error_preview_is_truncated() {
        let long = "x".repeat(500);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.len(), ERROR_BODY_PREVIEW + 3);
    }
}
