use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    extract::{AuthUser, ValidatedJson},
    models::{AddProductResponse, NewProduct, Product},
    AppState,
};

pub async fn get_products(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<Product>>, AppError> {
    tracing::debug!(user_id = %caller.user_id, "get-products");

    let products = state.products.list_all().await?;
    Ok(Json(products))
}

pub async fn add_product(
    State(state): State<AppState>,
    caller: AuthUser,
    ValidatedJson(payload): ValidatedJson<NewProduct>,
) -> Result<(StatusCode, Json<AddProductResponse>), AppError> {
    let id = state.products.add(payload).await?;
    tracing::info!(id, user_id = %caller.user_id, "product added");

    Ok((StatusCode::CREATED, Json(AddProductResponse { id })))
}
