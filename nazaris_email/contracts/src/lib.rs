use std::future::Future;

use nazaris_models::email_address::EmailAddressWithName;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Whether outgoing mail is configured. A disabled service fails every
    /// [`send`](EmailService::send).
    fn is_enabled(&self) -> bool;

    /// Sends the email and returns whether the SMTP server accepted it.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<bool>> + Send;

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddressWithName>,
    pub attachment: Option<EmailAttachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

#[derive(Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    /// MIME type of the attachment, `application/octet-stream` if unknown.
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for EmailAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailAttachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .finish()
    }
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.expect_is_enabled().return_const(enabled);
        self
    }

    pub fn with_send(mut self, email: Email, result: bool) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, email: Email, error: &'static str) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }

    pub fn with_ping(mut self, result: Result<(), &'static str>) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(result.map_err(|err| anyhow::anyhow!(err))))
        });
        self
    }
}
