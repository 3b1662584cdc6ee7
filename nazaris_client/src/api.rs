use std::{future::Future, sync::Arc};

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::{form::ContactForm, http::HttpClient};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8888/api/contact";

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Submits the form to the contact endpoint.
    fn submit(
        &self,
        form: &ContactForm,
    ) -> impl Future<Output = Result<(), SubmissionError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Failed to reach the contact endpoint: {0}")]
    Network(#[from] reqwest::Error),
    #[error(
        "The contact endpoint rejected the submission with status {status}: {}",
        .error.as_deref().unwrap_or("Ошибка отправки")
    )]
    Rejected { status: u16, error: Option<String> },
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    client: HttpClient,
    endpoint: Arc<Url>,
}

impl ContactClient {
    pub fn new(endpoint: Url) -> anyhow::Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ContactApiService for ContactClient {
    async fn submit(&self, form: &ContactForm) -> Result<(), SubmissionError> {
        let response = self
            .client
            .post((*self.endpoint).clone())
            .multipart(multipart(form))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        interpret_response(status, &body)
    }
}

fn multipart(form: &ContactForm) -> Form {
    let text = |value: &str| value.trim().to_owned();

    let multipart = Form::new()
        .text("name", text(&form.name))
        .text("phone", text(&form.phone))
        .text("email", text(&form.email))
        .text("workType", form.work_type.clone())
        .text("budget", text(&form.budget))
        .text("message", text(&form.message));

    let Some(file) = &form.file else {
        return multipart;
    };

    let part = || Part::bytes(file.content.clone()).file_name(file.filename.clone());
    let part = match &file.content_type {
        Some(content_type) => part().mime_str(content_type).unwrap_or_else(|_| part()),
        None => part(),
    };

    multipart.part("file", part)
}

/// Decides whether a response of the contact endpoint means the submission
/// was accepted.
///
/// A successful status is accepted if the body is empty or a JSON object with
/// `"ok": true`. Everything else is a rejection, carrying the `error` message
/// of the body if there is one.
pub fn interpret_response(status: u16, body: &str) -> Result<(), SubmissionError> {
    let success = (200..300).contains(&status);

    let data = (!body.is_empty()).then(|| {
        serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::Object(Default::default()))
    });

    match &data {
        None if success => return Ok(()),
        Some(data) if success && data.get("ok") == Some(&Value::Bool(true)) => return Ok(()),
        _ => {}
    }

    let error = data
        .as_ref()
        .and_then(|data| data.get("error"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    Err(SubmissionError::Rejected { status, error })
}
