use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::{domain::SessionValueBody, errors::SessionError, middleware::CurrentSession};

pub async fn get_value(
    session: CurrentSession,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, SessionError> {
    let value = session.get(&key).await?;
    Ok(Json(SessionValueBody { value }))
}

pub async fn put_value(
    session: CurrentSession,
    Path(key): Path<String>,
    Json(body): Json<SessionValueBody>,
) -> Result<impl IntoResponse, SessionError> {
    session.set(&key, &body.value).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_value(
    session: CurrentSession,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, SessionError> {
    session.del(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
