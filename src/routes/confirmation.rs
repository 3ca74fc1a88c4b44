use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::checkout::ConfirmationView,
    middleware::session::ActiveSession,
    response::ApiResponse,
    services::confirmation_service::{self, ConfirmationPhase},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(open_confirmation).delete(leave_confirmation))
}

#[utoipa::path(
    get,
    path = "/api/confirmation",
    responses(
        (status = 200, description = "Order details and progress; meta.redirect_to is `/` at the end", body = ApiResponse<ConfirmationView>)
    ),
    security(("session_id" = [])),
    tag = "Confirmation"
)]
pub async fn open_confirmation(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
) -> Json<ApiResponse<ConfirmationView>> {
    Json(confirmation_service::open(&session, state.timings))
}

#[utoipa::path(
    delete,
    path = "/api/confirmation",
    responses(
        (status = 200, description = "Pending timers cancelled", body = ApiResponse<ConfirmationPhase>)
    ),
    security(("session_id" = [])),
    tag = "Confirmation"
)]
pub async fn leave_confirmation(
    ActiveSession(session): ActiveSession,
) -> Json<ApiResponse<ConfirmationPhase>> {
    Json(confirmation_service::leave(&session))
}
