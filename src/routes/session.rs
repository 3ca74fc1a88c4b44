use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    middleware::session::ActiveSession,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionData {
    pub session_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_session).delete(clear_session))
}

#[utoipa::path(
    post,
    path = "/api/session",
    responses(
        (status = 200, description = "New browser session; send the id as x-session-id", body = ApiResponse<SessionData>)
    ),
    tag = "Session"
)]
pub async fn create_session(State(state): State<AppState>) -> Json<ApiResponse<SessionData>> {
    let session = state.sessions.create();
    Json(ApiResponse::success(
        "Session created",
        SessionData {
            session_id: session.id().to_string(),
        },
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/session",
    responses(
        (status = 200, description = "Storage cleared, timers dropped and the session forgotten", body = ApiResponse<SessionData>)
    ),
    security(("session_id" = [])),
    tag = "Session"
)]
pub async fn clear_session(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
) -> Json<ApiResponse<SessionData>> {
    state.sessions.remove(session.id());
    session.store().storage().clear();
    session.store().notify_cart_changed();
    tracing::info!(session_id = session.id(), "session storage cleared");

    Json(ApiResponse::success(
        "Session cleared",
        SessionData {
            session_id: session.id().to_string(),
        },
        Some(Meta::empty()),
    ))
}
