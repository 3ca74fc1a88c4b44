use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::checkout::{CheckoutDraft, PaymentSummary, ValidationReport},
    error::AppResult,
    middleware::session::ActiveSession,
    response::ApiResponse,
    services::checkout_service::{self, PaymentPhase},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(payment_summary).delete(cancel_payment))
        .route("/validate", post(validate))
        .route("/submit", post(submit))
        .route("/status", get(payment_status))
}

#[utoipa::path(
    get,
    path = "/api/checkout",
    responses(
        (status = 200, description = "Rental summary for the payment page", body = ApiResponse<PaymentSummary>)
    ),
    security(("session_id" = [])),
    tag = "Checkout"
)]
pub async fn payment_summary(
    ActiveSession(session): ActiveSession,
) -> Json<ApiResponse<PaymentSummary>> {
    Json(checkout_service::payment_summary(session.store()))
}

#[utoipa::path(
    post,
    path = "/api/checkout/validate",
    request_body = CheckoutDraft,
    responses(
        (status = 200, description = "Per-field errors", body = ApiResponse<ValidationReport>)
    ),
    tag = "Checkout"
)]
pub async fn validate(Json(draft): Json<CheckoutDraft>) -> Json<ApiResponse<ValidationReport>> {
    Json(checkout_service::validate_draft(&draft))
}

#[utoipa::path(
    post,
    path = "/api/checkout/submit",
    request_body = CheckoutDraft,
    responses(
        (status = 200, description = "Payment processing started", body = ApiResponse<PaymentPhase>),
        (status = 409, description = "A payment is already processing"),
        (status = 422, description = "Form has invalid fields"),
    ),
    security(("session_id" = [])),
    tag = "Checkout"
)]
pub async fn submit(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Json(draft): Json<CheckoutDraft>,
) -> AppResult<Json<ApiResponse<PaymentPhase>>> {
    let resp = checkout_service::submit(&session, state.timings, &draft)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/checkout/status",
    responses(
        (status = 200, description = "Payment phase; meta.redirect_to is set once done", body = ApiResponse<PaymentPhase>)
    ),
    security(("session_id" = [])),
    tag = "Checkout"
)]
pub async fn payment_status(ActiveSession(session): ActiveSession) -> Json<ApiResponse<PaymentPhase>> {
    Json(checkout_service::payment_status(&session))
}

#[utoipa::path(
    delete,
    path = "/api/checkout",
    responses(
        (status = 200, description = "Pending payment dropped", body = ApiResponse<PaymentPhase>)
    ),
    security(("session_id" = [])),
    tag = "Checkout"
)]
pub async fn cancel_payment(ActiveSession(session): ActiveSession) -> Json<ApiResponse<PaymentPhase>> {
    Json(checkout_service::cancel_payment(&session))
}
