use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing, Router,
};
use nazaris_core_site_contracts::{SiteFeatureService, SiteGetFileError};
use nazaris_models::site::SiteFile;
use tracing::error;

use crate::errors::plain_error;

pub fn router(service: Arc<impl SiteFeatureService>) -> Router<()> {
    Router::new()
        .route("/", routing::get(index))
        .route("/icon/*name", routing::get(icon))
        .route("/sitemap.xml", routing::get(sitemap))
        .route("/robots.txt", routing::get(robots))
        .fallback(page)
        .with_state(service)
}

async fn index(service: State<Arc<impl SiteFeatureService>>) -> Response {
    service
        .get_page("/".into())
        .await
        .map_or_else(site_error, file_response)
}

async fn icon(
    service: State<Arc<impl SiteFeatureService>>,
    Path(name): Path<String>,
) -> Response {
    service
        .get_icon(name)
        .await
        .map_or_else(site_error, file_response)
}

async fn sitemap(service: State<Arc<impl SiteFeatureService>>) -> Response {
    service
        .get_sitemap()
        .await
        .map_or_else(site_error, file_response)
}

async fn robots(service: State<Arc<impl SiteFeatureService>>) -> Response {
    match service.get_robots().await {
        Ok(file) => file_response(file),
        Err(err) => site_error(err.into()),
    }
}

async fn page(
    service: State<Arc<impl SiteFeatureService>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return plain_error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    }

    let Ok(path) = urlencoding::decode(uri.path()) else {
        return site_error(SiteGetFileError::NotFound);
    };

    service
        .get_page(path.into_owned())
        .await
        .map_or_else(site_error, file_response)
}

fn file_response(file: SiteFile) -> Response {
    ([(CONTENT_TYPE, file.content_type)], file.content).into_response()
}

fn site_error(err: SiteGetFileError) -> Response {
    match err {
        SiteGetFileError::Forbidden => plain_error(StatusCode::FORBIDDEN, "Forbidden"),
        SiteGetFileError::NotFound => plain_error(StatusCode::NOT_FOUND, "Not Found"),
        SiteGetFileError::Other(err) => {
            error!("Failed to read site file: {err}");
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
