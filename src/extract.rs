//! Request extractors shared by the handlers.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{error::AppError, AppState};

/// JSON body that has been deserialized and passed its `validator` rules.
/// Both failures are a 400 with the uniform error body.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Caller identity taken from a verified token.
///
/// The whole `Authorization` header value is the token; there is no
/// `Bearer ` scheme to strip.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                tracing::debug!("jwt token not found in the headers");
                AppError::Unauthorized("Please register/login first".to_string())
            })?;

        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::debug!("token verification failed: {}", e);
            AppError::from(e)
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
