use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    auth::{PasswordError, TokenError},
    store::StoreError,
};

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Conflict(String),
    NotFound(String),
    Unauthorized(String),
    Store(StoreError),
    Password(PasswordError),
    Signing(TokenError),
}

impl From<StoreError> for AppError {
    fn from(inner: StoreError) -> Self {
        match inner {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::AlreadyExists(msg) => AppError::Conflict(msg),
            other => AppError::Store(other),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(inner: PasswordError) -> Self {
        AppError::Password(inner)
    }
}

impl From<TokenError> for AppError {
    fn from(inner: TokenError) -> Self {
        match inner {
            signing @ (TokenError::Signing(_) | TokenError::ExpiryOutOfRange) => {
                AppError::Signing(signing)
            }
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(inner: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid payload: {}", inner.body_text()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(inner: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Invalid payload: {inner}"))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Store(_) | AppError::Password(_) | AppError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg) => msg,
            AppError::Store(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            AppError::Password(e) => {
                tracing::error!("Password hashing error: {}", e);
                "Password hashing error".to_string()
            }
            AppError::Signing(e) => {
                tracing::error!("JWT error: {}", e);
                "Token error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(StoreError::NotFound("x".into())), StatusCode::NOT_FOUND),
            (AppError::from(StoreError::AlreadyExists("x".into())), StatusCode::BAD_REQUEST),
            (
                AppError::from(StoreError::Storage(sqlx::Error::PoolTimedOut)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::from(TokenError::TokenExpired), StatusCode::UNAUTHORIZED),
            (AppError::from(TokenError::InvalidSignature), StatusCode::UNAUTHORIZED),
            (AppError::from(TokenError::InvalidSigningMethod), StatusCode::UNAUTHORIZED),
            (AppError::from(TokenError::MalformedToken), StatusCode::UNAUTHORIZED),
            (
                AppError::from(TokenError::ExpiryOutOfRange),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(PasswordError::Hashing("rng".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error:?}");
        }
    }

    #[tokio::test]
    async fn test_storage_detail_is_not_leaked() {
        let response = AppError::from(StoreError::Storage(sqlx::Error::PoolTimedOut)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"error": "Database error"}));
    }
}
