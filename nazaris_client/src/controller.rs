use std::sync::Arc;

use tokio::sync::watch;
use tracing::error;

use crate::{
    api::ContactApiService,
    fallback::FallbackContact,
    form::{ContactForm, FormField},
};

pub const SUCCESS_MESSAGE: &str =
    "Заявка отправлена успешно! Мы свяжемся с вами в ближайшее время.";

/// State of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    pub const IDLE: Self = Self {
        disabled: false,
        label: "Отправить заявку",
    };

    pub const PENDING: Self = Self {
        disabled: true,
        label: "Отправка…",
    };
}

/// The message shown below the form after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Invalid {
        field: FormField,
        message: &'static str,
    },
    Success,
    Fallback(FallbackContact),
}

impl FormMessage {
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Success)
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Invalid { message, .. } => (*message).into(),
            Self::Success => SUCCESS_MESSAGE.into(),
            Self::Fallback(fallback) => fallback.to_html(),
        }
    }
}

#[derive(Debug)]
pub struct ContactFormController<Api> {
    api: Api,
    support_email: Arc<str>,
    control: watch::Sender<SubmitControl>,
}

impl<Api> ContactFormController<Api>
where
    Api: ContactApiService,
{
    pub fn new(api: Api, support_email: impl Into<Arc<str>>) -> Self {
        Self {
            api,
            support_email: support_email.into(),
            control: watch::Sender::new(SubmitControl::IDLE),
        }
    }

    /// Observes the state of the submit button.
    pub fn control(&self) -> watch::Receiver<SubmitControl> {
        self.control.subscribe()
    }

    /// Validates and submits the form.
    ///
    /// The submit button is disabled while the request is in flight. The form
    /// is reset after a successful submission and left untouched otherwise.
    pub async fn handle_submit(&self, form: &mut ContactForm) -> FormMessage {
        if let Err(err) = form.validate() {
            return FormMessage::Invalid {
                field: err.field,
                message: err.message,
            };
        }

        self.control.send_replace(SubmitControl::PENDING);
        let result = self.api.submit(form).await;
        self.control.send_replace(SubmitControl::IDLE);

        match result {
            Ok(()) => {
                form.reset();
                FormMessage::Success
            }
            Err(err) => {
                error!("Form submission error: {err}");
                FormMessage::Fallback(FallbackContact::new(form, &self.support_email))
            }
        }
    }
}
