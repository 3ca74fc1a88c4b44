use std::sync::Arc;

use axum::extract::FromRequestParts;

use crate::{error::AppError, models::Identity, session::Session, state::AppState};

pub const SESSION_HEADER: &str = "x-session-id";
pub const SIGNED_IN_HEADER: &str = "x-identity-signed-in";
pub const IMAGE_URL_HEADER: &str = "x-identity-image-url";

/// The browser a request comes from, keyed by the `x-session-id` header.
#[derive(Debug, Clone)]
pub struct ActiveSession(pub Arc<Session>);

impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-session-id header".into()))?;

        let session_id = header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid x-session-id header".into()))?
            .trim();

        if session_id.is_empty() {
            return Err(AppError::BadRequest("Empty x-session-id header".into()));
        }

        Ok(ActiveSession(state.sessions.open(session_id)))
    }
}

/// Identity as reported by the sign-in widget in front of the service.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let signed_in = header(SIGNED_IN_HEADER)
            .map(|value| value.eq_ignore_ascii_case("true") || value == "1")
            .unwrap_or(false);

        Ok(Identity {
            signed_in,
            image_url: header(IMAGE_URL_HEADER),
        })
    }
}
