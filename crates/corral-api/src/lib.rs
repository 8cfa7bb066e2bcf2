//! HTTP envelope and error mapping for the Corral API.
//!
//! Every response carries a `success` flag. Successful responses wrap their
//! payload in `data` with an optional human-readable `message`; failures
//! carry an `error` string, plus a `details` list for schema-level
//! validation and — in development mode only — a `detail` field exposing
//! the internal cause of a 500.

use std::sync::OnceLock;

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use corral_core::ValidationError;
use corral_engine::ReconcileError;
use corral_storage::StorageError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

static EXPOSE_ERROR_DETAILS: OnceLock<bool> = OnceLock::new();

/// Enable internal error details on 500 responses. Set once at startup from
/// the environment setting; defaults to off (production behavior).
pub fn expose_error_details(enabled: bool) {
    let _ = EXPOSE_ERROR_DETAILS.set(enabled);
}

fn details_exposed() -> bool {
    EXPOSE_ERROR_DETAILS.get().copied().unwrap_or(false)
}

// -------------------------
// API errors
// -------------------------

/// High-level API errors mapped to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Validation failed")]
    SchemaValidation { details: Vec<String> },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn schema_validation(details: Vec<String>) -> Self {
        Self::SchemaValidation { details }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::SchemaValidation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            Self::BadRequest(msg) => json!({ "success": false, "error": msg }),
            Self::SchemaValidation { details } => json!({
                "success": false,
                "error": "Validation failed",
                "details": details,
            }),
            Self::NotFound(msg) => json!({ "success": false, "error": msg }),
            Self::Internal(msg) => {
                // Internals are omitted unless development mode opted in.
                if details_exposed() {
                    json!({
                        "success": false,
                        "error": "Internal server error",
                        "detail": msg,
                    })
                } else {
                    json!({ "success": false, "error": "Internal server error" })
                }
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Schema { violations } => ApiError::SchemaValidation {
                details: violations.iter().map(ToString::to_string).collect(),
            },
            StorageError::NotFound { collection, id } => {
                ApiError::not_found(format!("{collection}/{id} not found"))
            }
            other => {
                tracing::error!(error = %other, category = %other.category(), "storage failure");
                ApiError::internal(other.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::Validation(e) => e.into(),
            ReconcileError::Storage(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::to_vec(&self.body()).unwrap_or_else(|_| {
            br#"{"success":false,"error":"Internal server error"}"#.to_vec()
        });

        json_response(status, body)
    }
}

// -------------------------
// Success envelope
// -------------------------

/// A successful response: payload plus optional message and status.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: Option<String>,
    pub status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, status: StatusCode) -> Self {
        Self {
            data,
            message: None,
            status,
        }
    }

    /// 200 OK.
    pub fn ok(data: T) -> Self {
        Self::new(data, StatusCode::OK)
    }

    /// 201 Created, for single-item creation endpoints.
    pub fn created(data: T) -> Self {
        Self::new(data, StatusCode::CREATED)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = json!({ "success": true });
        match serde_json::to_value(&self.data) {
            Ok(data) => {
                envelope["data"] = data;
            }
            Err(_) => return ApiError::internal("response serialization failed").into_response(),
        }
        if let Some(message) = self.message {
            envelope["message"] = json!(message);
        }
        let body = serde_json::to_vec(&envelope)
            .unwrap_or_else(|_| br#"{"success":false,"error":"Internal server error"}"#.to_vec());

        json_response(self.status, body)
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let mut builder = axum::http::Response::builder().status(status);
    builder = builder.header(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    builder
        .body(axum::body::Body::from(body))
        .unwrap_or_else(|_| {
            axum::http::Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )
                .body(axum::body::Body::from("{}"))
                .expect("build fallback response")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use corral_core::FieldViolation;

    #[test]
    fn into_response_sets_status_and_content_type() {
        let resp = ApiError::bad_request("missing body").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, &HeaderValue::from_static("application/json"));
    }

    #[test]
    fn api_error_variants_map_to_statuses() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (ApiError::bad_request("x"), StatusCode::BAD_REQUEST),
            (
                ApiError::schema_validation(vec!["lat: out of range".into()]),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::not_found("x"), StatusCode::NOT_FOUND),
            (ApiError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn error_body_carries_success_false_and_message() {
        let body = ApiError::bad_request("post 1 is missing the required field 'title'").body();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "post 1 is missing the required field 'title'"
        );
    }

    #[test]
    fn schema_validation_body_enumerates_details() {
        let body = ApiError::schema_validation(vec![
            "lat: must be between -90 and 90".to_string(),
            "name: is required".to_string(),
        ])
        .body();
        assert_eq!(body["success"], false);
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn internal_error_body_hides_the_cause_by_default() {
        let body = ApiError::internal("connection pool exhausted").body();
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn storage_errors_translate_by_kind() {
        let schema = StorageError::schema(vec![FieldViolation::new("lat", "out of range")]);
        assert!(matches!(
            ApiError::from(schema),
            ApiError::SchemaValidation { .. }
        ));

        let missing = StorageError::not_found("posts", "123");
        assert!(matches!(ApiError::from(missing), ApiError::NotFound(_)));

        let infra = StorageError::connection("refused");
        assert!(matches!(ApiError::from(infra), ApiError::Internal(_)));
    }

    #[test]
    fn success_envelope_wraps_data_and_message() {
        let resp = ApiResponse::ok(serde_json::json!([1, 2, 3]))
            .with_message("Saved changes: 3 created, 0 updated, 0 deleted");
        assert_eq!(resp.status, StatusCode::OK);
        let http = resp.into_response();
        assert_eq!(http.status(), StatusCode::OK);
    }

    #[test]
    fn created_uses_201() {
        let resp = ApiResponse::created(serde_json::json!({"_id": "x"}));
        assert_eq!(resp.status, StatusCode::CREATED);
    }
}
