//! API Response types
//!
//! Every endpoint of the staff API answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "message": "OK",
//!     "result": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified API response structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the server accepted the request
    pub success: bool,
    /// Human-readable message, surfaced verbatim on failure
    #[serde(default)]
    pub message: String,
    /// Response payload (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

/// The server answered with `success: false` (or without the expected payload).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Rejection(pub String);

impl<T> ApiResponse<T> {
    /// Create a failed response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            result: None,
        }
    }

    /// Unwrap the payload.
    ///
    /// A response only counts as successful when `success` is set *and* a
    /// result is present; otherwise the server message is returned as the
    /// rejection reason.
    pub fn into_result(self) -> Result<T, Rejection> {
        match (self.success, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(Rejection(self.message)),
        }
    }

    /// Acknowledge a response that carries no payload (e.g. delete).
    pub fn into_ack(self) -> Result<(), Rejection> {
        if self.success {
            Ok(())
        } else {
            Err(Rejection(self.message))
        }
    }
}

/// Either a single record or a list of records.
///
/// The search endpoints return one record when the condition is unique
/// (e.g. by employee number) and a list otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;
    use serde_json::json;

    #[test]
    fn test_success_envelope_into_result() {
        let resp: ApiResponse<Vec<i64>> =
            serde_json::from_value(json!({"success": true, "message": "ok", "result": [1, 2]}))
                .unwrap();
        assert_eq!(resp.into_result().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_failure_envelope_keeps_server_message() {
        let resp: ApiResponse<Vec<i64>> =
            serde_json::from_value(json!({"success": false, "message": "not found"})).unwrap();
        assert_eq!(resp.into_result().unwrap_err(), Rejection("not found".into()));
    }

    #[test]
    fn test_success_without_result_is_rejected() {
        let resp: ApiResponse<i64> =
            serde_json::from_value(json!({"success": true, "message": "empty"})).unwrap();
        assert_eq!(resp.into_result().unwrap_err().0, "empty");
    }

    #[test]
    fn test_ack_ignores_missing_result() {
        let resp: ApiResponse<()> =
            serde_json::from_value(json!({"success": true, "message": "deleted", "result": null}))
                .unwrap();
        assert!(resp.into_ack().is_ok());

        let resp: ApiResponse<()> = ApiResponse::failure("in use");
        assert_eq!(resp.into_ack().unwrap_err().to_string(), "in use");
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let resp: ApiResponse<i64> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(resp.message, "");
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_one_or_many_normalizes_single_record() {
        let one: OneOrMany<Employee> =
            serde_json::from_value(json!({"id": 7, "name": "Kim"})).unwrap();
        let items = one.into_vec();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 7);

        let many: OneOrMany<Employee> =
            serde_json::from_value(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(many.into_vec().iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_failure_envelope_with_unexpected_result_shape() {
        // only `success` and `message` matter once the server said no
        let resp: ApiResponse<serde_json::Value> = serde_json::from_value(
            json!({"success": false, "message": "not found", "result": {}}),
        )
        .unwrap();
        assert_eq!(resp.into_result().unwrap_err().0, "not found");
    }

    #[test]
    fn test_failure_serializes_without_result() {
        let value = serde_json::to_value(ApiResponse::<i64>::failure("boom")).unwrap();
        assert_eq!(value, json!({"success": false, "message": "boom"}));
    }
}
