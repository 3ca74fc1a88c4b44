use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::cart::{AddToCartRequest, CartView, CheckoutSnapshot, UpdateQuantityRequest},
    error::AppResult,
    middleware::session::ActiveSession,
    response::ApiResponse,
    services::{cart_service, catalog_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart))
        .route("/checkout", post(proceed_to_checkout))
        .route(
            "/{item_id}",
            axum::routing::delete(remove_from_cart).patch(update_quantity),
        )
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines and totals", body = ApiResponse<CartView>)
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn cart_list(ActiveSession(session): ActiveSession) -> Json<ApiResponse<CartView>> {
    Json(cart_service::get_cart(session.store()))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add car or bump its quantity", body = ApiResponse<CartView>),
        (status = 404, description = "Car not found"),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let item = catalog_service::find_item(&state, &payload.item_id).await?;
    Ok(Json(cart_service::add_to_cart(session.store(), &item)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{item_id}",
    params(
        ("item_id" = String, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Removed", body = ApiResponse<CartView>),
        (status = 404, description = "Cart line not found"),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    ActiveSession(session): ActiveSession,
    Path(item_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_from_cart(session.store(), &item_id)?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{item_id}",
    params(
        ("item_id" = String, Path, description = "Car ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity changed", body = ApiResponse<CartView>),
        (status = 400, description = "Delta other than 1 or -1"),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn update_quantity(
    ActiveSession(session): ActiveSession,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_quantity(session.store(), &item_id, payload.delta)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    responses(
        (status = 200, description = "Snapshot written, continue to /payment", body = ApiResponse<CheckoutSnapshot>),
        (status = 400, description = "Cart is empty"),
    ),
    security(("session_id" = [])),
    tag = "Cart"
)]
pub async fn proceed_to_checkout(
    ActiveSession(session): ActiveSession,
) -> AppResult<Json<ApiResponse<CheckoutSnapshot>>> {
    let resp = cart_service::proceed_to_checkout(session.store())?;
    Ok(Json(resp))
}
