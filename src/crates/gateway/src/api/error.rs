//! API error types and HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use agent::ResolverError;
use workbook::WorkbookError;

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced as HTTP errors.
///
/// User-correctable spreadsheet failures in local mode never reach this type;
/// they become 200 responses carrying an error message, the way an assistant
/// would phrase them. What remains here is genuinely transport/system level.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is unusable (e.g. missing `workbook_name` in
    /// delegated mode).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Intent resolution failed.
    #[error("{0}")]
    Resolver(#[from] ResolverError),

    /// Document-level failure that is not user-correctable (load/save
    /// faults).
    #[error("{0}")]
    Workbook(#[from] WorkbookError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Resolver(ResolverError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Resolver(e) if e.is_user_correctable() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Resolver(_) => StatusCode::BAD_GATEWAY,
            ApiError::Workbook(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        tracing::warn!(%status, detail, "request failed");
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("missing field".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Resolver(ResolverError::Timeout(Duration::from_secs(30))).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ApiError::Resolver(ResolverError::EmptyResponse).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Workbook(WorkbookError::Save {
                path: "test.xlsx".into(),
                message: "disk full".into(),
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_action_is_unprocessable() {
        let err = ApiError::Resolver(ResolverError::InvalidAction(
            actions::ActionError::InvalidParameters("bad payload".into()),
        ));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
