//! The `{success, data, message, errors}` envelope every endpoint returns

use crate::models::lenient;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const FALLBACK_ERROR: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    #[serde(deserialize_with = "lenient::bool_or_false", default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            errors: self.errors,
        }
    }

    /// Extract the data of a successful response, or fail with its message
    pub fn into_result(self) -> Result<T>
    where
        T: Serialize,
    {
        if !self.success {
            anyhow::bail!("{}", self.error_message());
        }
        self.data
            .ok_or_else(|| anyhow::anyhow!("Response reported success but carried no data"))
    }

    /// Best human-readable explanation of a failed response.
    ///
    /// Looks at `message`, then `data.message` / `data.error`, then the first
    /// entry of `errors`.
    pub fn error_message(&self) -> String
    where
        T: Serialize,
    {
        if let Some(message) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }

        let data = self.data.as_ref().and_then(|d| serde_json::to_value(d).ok());
        if let Some(Value::Object(map)) = &data {
            for key in ["message", "error"] {
                if let Some(Value::String(s)) = map.get(key) {
                    if !s.trim().is_empty() {
                        return s.clone();
                    }
                }
            }
        }

        if let Some(first) = self.errors.as_ref().and_then(first_error) {
            return first;
        }

        FALLBACK_ERROR.to_string()
    }
}

impl ApiResponse<Value> {
    /// Decode the untyped `data` into `T`
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiResponse<T>> {
        self.try_map(|value| serde_json::from_value(value).context("Failed to decode response data"))
    }

    /// Convert `data` of a successful response with `f`.
    ///
    /// A failed response keeps no data; its best error message is moved into
    /// `message` so nothing the backend said gets lost with the payload.
    pub fn try_map<U>(self, f: impl FnOnce(Value) -> Result<U>) -> Result<ApiResponse<U>> {
        if !self.success {
            let message = self.error_message();
            return Ok(ApiResponse {
                success: false,
                data: None,
                message: Some(message),
                errors: self.errors,
            });
        }

        let data = match self.data {
            Some(Value::Null) | None => None,
            Some(value) => Some(f(value)?),
        };
        Ok(ApiResponse {
            success: true,
            data,
            message: self.message,
            errors: self.errors,
        })
    }
}

/// First message in an `errors` value: a string, a list, or a field → messages map
fn first_error(errors: &Value) -> Option<String> {
    match errors {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_error),
        Value::Object(map) => map.values().find_map(first_error),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ApiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_message_sources_in_order() {
        assert_eq!(parse(json!({"success": false, "message": "Top"})).error_message(), "Top");
        assert_eq!(
            parse(json!({"success": false, "message": "", "data": {"message": "Nested"}})).error_message(),
            "Nested"
        );
        assert_eq!(
            parse(json!({"success": false, "data": {"error": "Boom"}})).error_message(),
            "Boom"
        );
        assert_eq!(
            parse(json!({"success": false, "errors": {"email": ["Email taken"]}})).error_message(),
            "Email taken"
        );
        assert_eq!(parse(json!({"success": false})).error_message(), FALLBACK_ERROR);
    }

    #[test]
    fn test_decode_and_into_result() {
        let response = parse(json!({"success": "1", "data": {"id": 3}}));
        assert!(response.success);

        #[derive(Deserialize, Serialize)]
        struct Created {
            id: u64,
        }
        let created = response.decode::<Created>().unwrap().into_result().unwrap();
        assert_eq!(created.id, 3);

        let failed = parse(json!({"success": false, "message": "Nope"}));
        let err = failed.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Nope");
    }

    #[test]
    fn test_failed_decode_keeps_nested_message() {
        let failed = parse(json!({"success": false, "data": {"error": "Report locked"}}));
        let typed = failed.decode::<Vec<u64>>().unwrap();
        assert!(!typed.success);
        assert!(typed.data.is_none());
        assert_eq!(typed.error_message(), "Report locked");
    }
}
