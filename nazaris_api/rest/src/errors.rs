use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub fn error(code: StatusCode, error: &'static str) -> Response {
    (code, Json(ApiError { error })).into_response()
}

/// Error responses of the static site are plain text.
pub fn plain_error(code: StatusCode, body: &'static str) -> Response {
    (code, [(CONTENT_TYPE, "text/plain")], body).into_response()
}
