use axum::extract::State;
use axum::http::HeaderMap;
use axum::{http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState, domain::LogoutResponse, errors::SessionError,
    utils::cookie_helpers::clear_cookie, utils::REFRESH_COOKIE_PATH,
};

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, impl IntoResponse), SessionError> {
    state.provider.destroy(&headers).await?;

    let jar = jar
        .add(clear_cookie(state.config.access_cookie_name(), "/"))
        .add(clear_cookie(
            state.config.refresh_cookie_name(),
            REFRESH_COOKIE_PATH,
        ));

    Ok((
        jar,
        (
            StatusCode::OK,
            Json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            }),
        ),
    ))
}
