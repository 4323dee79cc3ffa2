//! Error conversions - From implementations for common error types
//!
//! Conversion from kernel errors to [`AppError`], and the outward
//! conversions into HTTP / GraphQL error shapes.

#[cfg(feature = "graphql")]
use async_graphql::ErrorExtensions;

use super::app_error::AppError;
use crate::global_id::GlobalIdError;

// ============================================================================
// Kernel conversions
// ============================================================================

impl From<GlobalIdError> for AppError {
    fn from(err: GlobalIdError) -> Self {
        AppError::bad_request(err.to_string()).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.public_message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// GraphQL conversions (feature-gated)
// ============================================================================

#[cfg(feature = "graphql")]
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let kind = self.kind();
        let action = self.action().map(str::to_owned);

        async_graphql::Error::new(self.public_message()).extend_with(|_, e| {
            e.set("code", kind.graphql_code());
            e.set("status", i32::from(kind.status_code()));
            if let Some(action) = action {
                e.set("action", action);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_global_id_error_conversion() {
        let err = crate::global_id::decode("not base64!").unwrap_err();
        let app_err: AppError = err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "graphql")]
    #[test]
    fn test_graphql_extensions_carry_code() {
        let err = AppError::forbidden("You do not own this tag").extend();
        assert_eq!(err.message, "You do not own this tag");

        let extensions = err.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("PermissionError"))
        );
    }
}
