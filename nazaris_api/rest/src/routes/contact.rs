use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use nazaris_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use nazaris_models::contact::{ContactAttachment, ContactSubmission};
use tracing::{error, warn};

use crate::{
    errors::error,
    middlewares::cors::preflight,
    models::contact::{ApiContactSubmission, ApiSubmitResponse},
};

/// Routes below `/api`.
pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit).options(preflight))
        .route("/*path", routing::options(preflight))
        .with_state(service)
}

async fn submit(service: State<Arc<impl ContactFeatureService>>, request: Request) -> Response {
    let form = if is_multipart(request.headers()) {
        match read_multipart(request).await {
            Ok(form) => form,
            Err(err) => {
                warn!("Failed to parse multipart form: {err}");
                return error(StatusCode::INTERNAL_SERVER_ERROR, "Invalid form data");
            }
        }
    } else {
        match read_json(request).await {
            Ok(form) => form,
            Err(err) => {
                warn!("Failed to parse json body: {err}");
                return error(StatusCode::INTERNAL_SERVER_ERROR, "Send failed");
            }
        }
    };

    let submission = match ContactSubmission::try_from(form) {
        Ok(submission) => submission,
        Err(err) => {
            warn!("Rejected contact submission: {err}");
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Send failed");
        }
    };

    match service.submit(submission).await {
        Ok(()) => Json(ApiSubmitResponse { ok: true }).into_response(),
        Err(ContactSubmitError::NotConfigured) => {
            error!("Email is not configured, set EMAIL_PASS to enable the contact form");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Email not configured")
        }
        Err(ContactSubmitError::Send) => error(StatusCode::INTERNAL_SERVER_ERROR, "Send failed"),
        Err(ContactSubmitError::Other(err)) => {
            error!("Failed to send contact submission: {err}");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Send failed")
        }
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("multipart/form-data"))
}

/// Collects the text fields of the form and the first uploaded file.
async fn read_multipart(request: Request) -> anyhow::Result<ApiContactSubmission> {
    let mut multipart = Multipart::from_request(request, &()).await?;
    let mut form = ApiContactSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        if let Some(filename) = field.file_name() {
            if form.attachment.is_some() {
                continue;
            }
            let filename = filename.to_owned();
            let content_type = field.content_type().map(ToOwned::to_owned);
            let content = field.bytes().await?;
            form.attachment = Some(ContactAttachment::new(
                Some(&filename),
                content_type,
                content.to_vec(),
            ));
            continue;
        }

        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        let value = field.text().await?;
        form.set_field(&name, value.trim().to_owned());
    }

    Ok(form)
}

async fn read_json(request: Request) -> anyhow::Result<ApiContactSubmission> {
    let body = Bytes::from_request(request, &()).await?;
    serde_json::from_slice(&body).map_err(Into::into)
}
