use std::sync::Arc;

use axum::extract::State;
use car_rental_storefront::{
    catalog::StaticCatalog, config::CheckoutTimings, routes::health::health_check,
    state::AppState,
};

#[tokio::test]
async fn health_check_returns_ok() {
    let state = AppState::new(Arc::new(StaticCatalog::default()), CheckoutTimings::default());
    state.sessions.create();

    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.sessions, 1);
}
