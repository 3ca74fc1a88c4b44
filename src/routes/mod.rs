use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod confirmation;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod navbar;
pub mod params;
pub mod session;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/session", session::router())
        .nest("/catalog", catalog::router())
        .nest("/cart", cart::router())
        .nest("/favorites", favorites::router())
        .nest("/checkout", checkout::router())
        .nest("/confirmation", confirmation::router())
        .nest("/navbar", navbar::router())
}

/// Health, the API under `/api`, and the docs, bound to `state`. HTTP layers are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
