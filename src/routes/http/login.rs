use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::app_state::AppState;
use crate::domain::{LoginRequestBody, LoginResponse};
use crate::errors::SessionError;

// Credential checks happen upstream; this only opens the session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequestBody>,
) -> Result<impl IntoResponse, SessionError> {
    if request.user_id.trim().is_empty() {
        return Err(SessionError::Unauthorized);
    }

    let (_session, issued) = state
        .provider
        .new_session(&request.user_id, request.jwt_data, request.session_data)
        .await?;

    let response = Json(LoginResponse {
        message: "Logged in successfully".to_string(),
        ssid: issued.ssid.clone(),
    });

    Ok((StatusCode::OK, issued, response))
}
