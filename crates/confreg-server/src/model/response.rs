//! HTTP response envelopes
//!
//! Successful calls render the domain object directly. Failures are rendered
//! as a [`Result`] envelope carrying the numeric error code.

use actix_web::{HttpResponse, HttpResponseBuilder, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Error envelope for API responses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Result<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T> Result<T> {
    pub fn new(code: i32, message: String, data: T) -> Self {
        Result::<T> {
            code,
            message,
            data,
        }
    }

    pub fn http_response(
        status: u16,
        code: i32,
        message: String,
        data: impl Serialize,
    ) -> HttpResponse {
        HttpResponseBuilder::new(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .json(Result::new(code, message, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_status() {
        let response = Result::<String>::http_response(404, 20004, "gone".to_string(), "");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = Result::<String>::http_response(1000, 30000, "bad".to_string(), "");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(Result::new(20005, "exists".to_string(), "")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "code": 20005, "message": "exists", "data": "" })
        );
    }
}
