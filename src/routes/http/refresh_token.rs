use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::{app_state::AppState, errors::SessionError};

pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, SessionError> {
    let issued = state.provider.renew_access_token(&headers).await?;
    Ok((issued, StatusCode::OK))
}
