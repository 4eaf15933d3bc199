use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{product, user},
    AppState,
};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
        .route("/list-users", get(user::list_users))
        .route("/get-products", get(product::get_products))
        .route("/add-product", post(product::add_product));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
