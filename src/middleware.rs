//! Request filter that admits only requests carrying a valid access
//! credential, plus the extractor handlers use to reach the bound session.
use std::ops::Deref;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{app_state::AppState, domain::SessionHandle, errors::SessionError};

/// The session attached to a request by `require_session`.
#[derive(Clone)]
pub struct CurrentSession(pub SessionHandle);

impl Deref for CurrentSession {
    type Target = SessionHandle;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Calls `Provider::get`; on failure the request ends with 401 and the
/// downstream handler never runs. No retry and no backend writes.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.provider.get(request.headers()).await {
        Ok(session) => {
            request.extensions_mut().insert(CurrentSession(session));
            next.run(request).await
        }
        Err(e) => {
            log::debug!("unauthorized request to {}: {e}", request.uri().path());
            (StatusCode::UNAUTHORIZED, [("WWW-Authenticate", "Bearer")]).into_response()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or(SessionError::Unauthorized)
    }
}
