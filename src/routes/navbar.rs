use std::{convert::Infallible, time::Duration};

use axum::{
    Json, Router,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::{Stream, StreamExt};

use crate::{
    middleware::session::ActiveSession,
    models::Identity,
    response::ApiResponse,
    services::navbar_service::{self, NavbarView},
    state::AppState,
    store::CART_UPDATED,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(navbar))
        .route("/cart-count/stream", get(cart_count_stream))
}

#[utoipa::path(
    get,
    path = "/api/navbar",
    responses(
        (status = 200, description = "Cart badge and sign-in state", body = ApiResponse<NavbarView>)
    ),
    security(("session_id" = [])),
    tag = "Navbar"
)]
pub async fn navbar(
    ActiveSession(session): ActiveSession,
    identity: Identity,
) -> Json<ApiResponse<NavbarView>> {
    Json(navbar_service::navbar(session.store(), &identity))
}

#[utoipa::path(
    get,
    path = "/api/navbar/cart-count/stream",
    responses(
        (status = 200, description = "Server-sent `cartUpdated` events carrying the re-read count")
    ),
    security(("session_id" = [])),
    tag = "Navbar"
)]
pub async fn cart_count_stream(
    ActiveSession(session): ActiveSession,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = navbar_service::cart_count_stream(session.store().clone())
        .map(|count| Ok(Event::default().event(CART_UPDATED).data(count.to_string())));
    Sse::new(events).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
