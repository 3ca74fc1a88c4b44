use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::{
        cart::CartView,
        catalog::{ItemCard, ItemList},
    },
    error::AppResult,
    middleware::session::ActiveSession,
    models::Item,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items))
        .route("/selected", get(selected_item))
        .route("/{id}", get(get_item))
        .route("/{id}/rent", post(rent_now))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(
        ("show_all" = Option<bool>, Query, description = "List every car instead of the first four"),
        ("capacity" = Option<String>, Query, description = "Seating capacities, comma separated"),
        ("transmission" = Option<String>, Query, description = "Manual or Automatic"),
        ("min_price" = Option<f64>, Query, description = "Lowest price per day"),
        ("max_price" = Option<f64>, Query, description = "Highest price per day"),
    ),
    responses(
        (status = 200, description = "List cars", body = ApiResponse<ItemList>),
        (status = 400, description = "Bad filter"),
    ),
    security(("session_id" = [])),
    tag = "Catalog"
)]
pub async fn list_items(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let resp = catalog_service::list_items(&state, session.store(), query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/{id}",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Get car", body = ApiResponse<Item>),
        (status = 404, description = "Car not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let resp = catalog_service::get_item(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/catalog/{id}/rent",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car selected and added to cart", body = ApiResponse<CartView>),
        (status = 404, description = "Car not found"),
    ),
    security(("session_id" = [])),
    tag = "Catalog"
)]
pub async fn rent_now(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = catalog_service::rent_now(&state, session.store(), &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/selected",
    responses(
        (status = 200, description = "Car shown on the detail page", body = ApiResponse<ItemCard>),
        (status = 404, description = "Nothing selected yet"),
    ),
    security(("session_id" = [])),
    tag = "Catalog"
)]
pub async fn selected_item(
    ActiveSession(session): ActiveSession,
) -> AppResult<Json<ApiResponse<ItemCard>>> {
    let resp = catalog_service::selected_item(session.store())?;
    Ok(Json(resp))
}
