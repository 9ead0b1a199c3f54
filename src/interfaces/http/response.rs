//! JSON response envelope

use serde::{Deserialize, Serialize};

/// Standard envelope wrapping every JSON body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Error description, omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error() {
        let body = serde_json::to_value(ApiResponse::success(7)).unwrap();
        assert_eq!(body, json!({ "success": true, "data": 7 }));
    }

    #[test]
    fn error_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(body, json!({ "success": false, "data": null, "error": "boom" }));
    }
}
