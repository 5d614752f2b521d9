//! Toast messages raised by controller actions

use crate::api::ApiResponse;
use anyhow::Result;
use log::{error, info};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("toast success: {}", message);
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("toast error: {}", message);
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.toasts.push(Toast { kind, message });
    }

    /// Turn the outcome of a mutating call into a toast.
    ///
    /// Returns whether the call succeeded. The backend's own message wins
    /// over `success_message` when it sent one.
    pub fn settle<T: Serialize>(&mut self, outcome: Result<ApiResponse<T>>, success_message: &str) -> bool {
        match outcome {
            Ok(response) if response.success => {
                let message = response
                    .message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(success_message)
                    .to_string();
                self.success(message);
                true
            }
            Ok(response) => {
                self.error(response.error_message());
                false
            }
            Err(err) => {
                self.error(format!("{:#}", err));
                false
            }
        }
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn has_errors(&self) -> bool {
        self.toasts.iter().any(|t| t.kind == ToastKind::Error)
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_settle_prefers_backend_message() {
        let mut notifications = Notifications::new();
        let ok: Result<ApiResponse> = Ok(ApiResponse::ok(Value::Null).with_message("Client created"));
        assert!(notifications.settle(ok, "Saved"));
        assert_eq!(notifications.last().unwrap().message, "Client created");

        let failed: Result<ApiResponse> = Ok(ApiResponse::failure("Email already exists"));
        assert!(!notifications.settle(failed, "Saved"));
        assert_eq!(
            notifications.last().unwrap(),
            &Toast {
                kind: ToastKind::Error,
                message: "Email already exists".into()
            }
        );

        let broken: Result<ApiResponse> = Err(anyhow::anyhow!("connection refused"));
        assert!(!notifications.settle(broken, "Saved"));
        assert!(notifications.has_errors());
        assert_eq!(notifications.drain().len(), 3);
        assert!(notifications.toasts().is_empty());
    }
}
