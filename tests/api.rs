use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use car_rental_storefront::{
    catalog::StaticCatalog, config::CheckoutTimings, models::Item, routes::create_app,
    state::AppState,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    app_with_state().0
}

fn app_with_state() -> (Router, AppState) {
    let items = vec![Item {
        id: "gtr".into(),
        name: "Nissan GT-R".into(),
        brand: "Nissan".into(),
        price_per_day: Decimal::from(80),
        image_url: Some("/cars/gtr.png".into()),
        tags: Some(vec!["sport".into()]),
        fuel_capacity: "90L".into(),
        transmission: "Manual".into(),
        seating_capacity: 2,
    }];
    let state = AppState::new(Arc::new(StaticCatalog::new(items)), CheckoutTimings::default());
    (create_app(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn request(method: Method, uri: &str, session: &str, body: Option<Value>) -> anyhow::Result<Request<Body>> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-session-id", session)
        .header("content-type", "application/json");
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    Ok(builder.body(body)?)
}

#[tokio::test]
async fn session_is_required_for_cart_routes() -> anyhow::Result<()> {
    let app = app();
    let req = Request::builder().uri("/api/cart").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["error"], "Bad Request Missing x-session-id header");
    Ok(())
}

#[tokio::test]
async fn cart_round_trip_through_the_router() -> anyhow::Result<()> {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/session")
        .body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    let session = body["data"]["session_id"].as_str().unwrap_or_default().to_string();
    assert!(!session.is_empty());

    let add = request(Method::POST, "/api/cart", &session, Some(json!({ "item_id": "gtr" })))?;
    let (status, body) = send(&app, add).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lines"][0]["_id"], "gtr");
    assert_eq!(body["data"]["lines"][0]["quantity"], 1);
    assert_eq!(body["data"]["display"]["total"], "88.00");

    let nav = request(Method::GET, "/api/navbar", &session, None)?;
    let (_, body) = send(&app, nav).await?;
    assert_eq!(body["data"]["cart_count"], 1);

    let bump = request(Method::PATCH, "/api/cart/gtr", &session, Some(json!({ "delta": 1 })))?;
    let (_, body) = send(&app, bump).await?;
    assert_eq!(body["data"]["lines"][0]["quantity"], 2);

    let checkout = request(Method::POST, "/api/cart/checkout", &session, None)?;
    let (status, body) = send(&app, checkout).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["redirect_to"], "/payment");
    assert_eq!(body["data"]["total"], 160.0);

    let missing = request(Method::DELETE, "/api/cart/other", &session, None)?;
    let (status, _) = send(&app, missing).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn sessions_do_not_share_storage() -> anyhow::Result<()> {
    let app = app();
    let add = request(Method::POST, "/api/cart", "alice", Some(json!({ "item_id": "gtr" })))?;
    send(&app, add).await?;

    let (_, body) = send(&app, request(Method::GET, "/api/cart", "bob", None)?).await?;
    assert_eq!(body["data"]["is_empty"], true);

    let (_, body) = send(&app, request(Method::GET, "/api/cart", "alice", None)?).await?;
    assert_eq!(body["data"]["is_empty"], false);

    let (status, _) = send(&app, request(Method::DELETE, "/api/session", "alice", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, request(Method::GET, "/api/cart", "alice", None)?).await?;
    assert_eq!(body["data"]["is_empty"], true);
    Ok(())
}

#[tokio::test]
async fn invalid_submission_returns_field_errors() -> anyhow::Result<()> {
    let app = app();
    let draft = json!({ "paymentMethod": "credit-card", "name": "Ada" });
    let submit = request(Method::POST, "/api/checkout/submit", "carol", Some(draft))?;

    let (status, body) = send(&app, submit).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["fields"]["name"], json!([]));
    assert_eq!(body["data"]["fields"]["city"][0], "City is required.");
    assert_eq!(body["data"]["fields"]["cvc"][0], "CVC is required.");
    Ok(())
}

#[tokio::test]
async fn favorites_toggle_and_catalog_flag() -> anyhow::Result<()> {
    let app = app();
    let toggle = request(Method::POST, "/api/favorites/toggle", "dave", Some(json!({ "item_id": "gtr" })))?;
    let (_, body) = send(&app, toggle).await?;
    assert_eq!(body["message"], "Added to favorites");

    let (_, body) = send(&app, request(Method::GET, "/api/catalog", "dave", None)?).await?;
    assert_eq!(body["data"]["items"][0]["is_favorite"], true);
    assert_eq!(body["meta"]["total"], 1);

    let (status, _) = send(&app, request(Method::GET, "/api/catalog?capacity=x", "dave", None)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_paths_fall_back_to_not_found() -> anyhow::Result<()> {
    let app = app();
    let req = Request::builder().uri("/nowhere").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nowhere");
    Ok(())
}

#[tokio::test]
async fn clearing_a_session_forgets_it() -> anyhow::Result<()> {
    let (app, state) = app_with_state();
    for id in ["erin", "frank"] {
        send(&app, request(Method::GET, "/api/cart", id, None)?).await?;
    }
    assert_eq!(state.sessions.len(), 2);

    let (status, _) = send(&app, request(Method::DELETE, "/api/session", "erin", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.sessions.len(), 1);
    assert!(state.sessions.get("erin").is_none());

    send(&app, request(Method::DELETE, "/api/session", "frank", None)?).await?;
    assert!(state.sessions.is_empty());
    Ok(())
}
