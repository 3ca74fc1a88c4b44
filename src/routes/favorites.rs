use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::favorites::{FavoriteList, ToggleFavoriteRequest, ToggleResult},
    error::AppResult,
    middleware::session::ActiveSession,
    response::ApiResponse,
    services::{catalog_service, favorite_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites))
        .route("/toggle", post(toggle_favorite))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "List favorite cars", body = ApiResponse<FavoriteList>)
    ),
    security(("session_id" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(ActiveSession(session): ActiveSession) -> Json<ApiResponse<FavoriteList>> {
    Json(favorite_service::list_favorites(session.store()))
}

#[utoipa::path(
    post,
    path = "/api/favorites/toggle",
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 200, description = "Heart toggled", body = ApiResponse<ToggleResult>),
        (status = 404, description = "Car not found")
    ),
    security(("session_id" = [])),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Json(payload): Json<ToggleFavoriteRequest>,
) -> AppResult<Json<ApiResponse<ToggleResult>>> {
    let item = catalog_service::find_item(&state, &payload.item_id).await?;
    Ok(Json(favorite_service::toggle_favorite(session.store(), &item)))
}
