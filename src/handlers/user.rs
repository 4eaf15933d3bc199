use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{hash_password_blocking, verify_password_blocking},
    error::AppError,
    extract::{AuthUser, ValidatedJson},
    models::{LoginPayload, LoginResponse, NewUser, RegisterPayload, RegisterResponse, UserSummary},
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let password_hash = hash_password_blocking(payload.password, state.hash_params).await?;

    let id = state
        .users
        .create(NewUser {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email.clone(),
            password_hash,
        })
        .await?;

    tracing::info!(id, email = %payload.email, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User Created Successfully".to_string(),
            id,
            email: payload.email,
        }),
    ))
}

/// Answers with 302 Found on success; clients of this API key on that status.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginPayload>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let user = state.users.get_by_email(&payload.email).await?;

    if !verify_password_blocking(user.password_hash.clone(), payload.password).await? {
        tracing::info!(id = user.id, "invalid password");
        return Err(AppError::Unauthorized("Invalid Password".to_string()));
    }

    let token = state.tokens.issue(&user.id.to_string())?;
    tracing::info!(id = user.id, "user logged in");

    Ok((StatusCode::FOUND, Json(LoginResponse::new(token, user))))
}

pub async fn list_users(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    tracing::debug!(user_id = %caller.user_id, "list-users");

    let users = state.users.list_all().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}
