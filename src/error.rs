use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("no available coupons for {child_name} ({guardian_email})")]
    NoAvailableCoupons {
        guardian_email: String,
        child_name: String,
    },

    /// A programming error; never expected at runtime.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl KitchenError {
    pub fn code(&self) -> &'static str {
        match self {
            KitchenError::NotFound(_) => "not_found",
            KitchenError::Validation(_) => "validation_error",
            KitchenError::NoAvailableCoupons { .. } => "no_available_coupons",
            KitchenError::InvariantViolation(_) => "invariant_violation",
            KitchenError::Storage(_) => "storage_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            KitchenError::NotFound(_) | KitchenError::NoAvailableCoupons { .. } => {
                StatusCode::NOT_FOUND
            }
            KitchenError::Validation(_) => StatusCode::BAD_REQUEST,
            KitchenError::InvariantViolation(_) | KitchenError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for KitchenError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = ?self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (
            status,
            Json(ErrorBody {
                error: self.code(),
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupons_exhausted_is_distinct_from_not_found() {
        let exhausted = KitchenError::NoAvailableCoupons {
            guardian_email: "mum@example.com".into(),
            child_name: "Ivan Petrov".into(),
        };
        let missing = KitchenError::NotFound("menu".into());
        assert_eq!(exhausted.status(), missing.status());
        assert_ne!(exhausted.code(), missing.code());
        assert!(exhausted.to_string().contains("Ivan Petrov"));
    }

    #[tokio::test]
    async fn storage_errors_are_not_leaked() {
        let err = KitchenError::from(anyhow::anyhow!("password=hunter2"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("storage_error"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = KitchenError::Validation("count must be positive".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "validation_error");
    }
}
