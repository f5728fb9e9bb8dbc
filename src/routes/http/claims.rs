use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::{
    app_state::AppState,
    domain::{Claims, UpdateClaimsRequestBody},
    errors::SessionError,
    middleware::CurrentSession,
};

pub async fn get_claims(session: CurrentSession) -> Json<Claims> {
    Json(session.claims().clone())
}

pub async fn update_claims(
    State(state): State<AppState>,
    session: CurrentSession,
    headers: HeaderMap,
    Json(request): Json<UpdateClaimsRequestBody>,
) -> Result<impl IntoResponse, SessionError> {
    let claims = Claims::new(session.claims().user_id.clone(), request.ssid, request.data);
    let issued = state.provider.update_claims(&headers, claims).await?;
    Ok((issued, StatusCode::NO_CONTENT))
}
