use anyhow::{anyhow, Context};
use lettre::{
    message::{header, Attachment, MessageBuilder, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use nazaris_email_contracts::{ContentType, Email, EmailAttachment, EmailService};
use nazaris_models::email_address::EmailAddressWithName;
use nazaris_utils::Apply;
use tracing::debug;

const DEFAULT_ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

/// How the connection to the SMTP relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// TLS from the first byte, usually port 465.
    Wrapper,
    /// Plain connection upgraded with `STARTTLS`, usually port 587.
    StartTls,
}

impl SmtpTls {
    pub fn from_secure(secure: bool) -> Self {
        if secure {
            Self::Wrapper
        } else {
            Self::StartTls
        }
    }
}

impl EmailServiceImpl {
    /// Creates an email service sending through the given relay. Without a
    /// password the service is [disabled](EmailServiceImpl::disabled).
    pub fn new(
        host: &str,
        port: u16,
        tls: SmtpTls,
        user: &str,
        password: Option<&str>,
        from: EmailAddressWithName,
    ) -> anyhow::Result<Self> {
        let Some(password) = password else {
            return Ok(Self::disabled(from));
        };

        let builder = match tls {
            SmtpTls::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
            SmtpTls::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
        }
        .with_context(|| format!("Invalid smtp relay {host}"))?;

        let transport = builder
            .port(port)
            .credentials(Credentials::new(user.into(), password.into()))
            .build();

        Ok(Self {
            from,
            transport: Some(transport),
        })
    }

    pub fn disabled(from: EmailAddressWithName) -> Self {
        Self {
            from,
            transport: None,
        }
    }

    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        Self {
            from: "dummy@example.com".parse().unwrap(),
            transport: Some(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous("dummy").build()),
        }
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let builder = Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject);

        let message = match email.attachment {
            None => builder
                .header(match email.content_type {
                    ContentType::Text => header::ContentType::TEXT_PLAIN,
                    ContentType::Html => header::ContentType::TEXT_HTML,
                })
                .body(email.body)?,
            Some(attachment) => {
                let body = match email.content_type {
                    ContentType::Text => SinglePart::plain(email.body),
                    ContentType::Html => SinglePart::html(email.body),
                };
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(body)
                        .singlepart(attachment_part(attachment)?),
                )?
            }
        };

        Ok(message)
    }
}

fn attachment_part(attachment: EmailAttachment) -> anyhow::Result<SinglePart> {
    let content_type = attachment
        .content_type
        .as_deref()
        .and_then(|content_type| header::ContentType::parse(content_type).ok());
    let content_type = match content_type {
        Some(content_type) => content_type,
        None => header::ContentType::parse(DEFAULT_ATTACHMENT_CONTENT_TYPE)?,
    };

    Ok(Attachment::new(attachment.filename).body(attachment.content, content_type))
}

impl EmailService for EmailServiceImpl {
    fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| anyhow!("Sending emails is disabled"))?;

        let message = self.build_message(email)?;
        debug!(to = ?message.envelope().to(), "sending email");

        transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| anyhow!("Sending emails is disabled"))?;

        transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sut() -> EmailServiceImpl {
        EmailServiceImpl::new(
            "smtp.example.com",
            587,
            SmtpTls::StartTls,
            "sender@example.com",
            Some("secret"),
            "sender@example.com".parse().unwrap(),
        )
        .unwrap()
    }

    fn email() -> Email {
        Email {
            recipient: "inbox@example.com".parse().unwrap(),
            subject: "Contact request".into(),
            body: "Hello World!".into(),
            content_type: ContentType::Text,
            reply_to: Some("ivan@example.com".parse().unwrap()),
            attachment: None,
        }
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[tokio::test]
    async fn enabled_with_password() {
        assert!(sut().is_enabled());
    }

    #[tokio::test]
    async fn disabled_without_password() {
        let sut = EmailServiceImpl::new(
            "smtp.example.com",
            587,
            SmtpTls::StartTls,
            "sender@example.com",
            None,
            "sender@example.com".parse().unwrap(),
        )
        .unwrap();

        assert!(!sut.is_enabled());
        assert!(sut.send(email()).await.is_err());
        assert!(sut.ping().await.is_err());
    }

    #[tokio::test]
    async fn plain_text_message() {
        let message = sut().build_message(email()).unwrap();
        let formatted = formatted(&message);

        assert!(formatted.contains("From: sender@example.com"));
        assert!(formatted.contains("To: inbox@example.com"));
        assert!(formatted.contains("Reply-To: ivan@example.com"));
        assert!(formatted.contains("Subject: Contact request"));
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(formatted.contains("Hello World!"));
        assert!(!formatted.contains("multipart/mixed"));
    }

    #[tokio::test]
    async fn message_with_attachment() {
        let message = sut()
            .build_message(Email {
                attachment: Some(EmailAttachment {
                    filename: "brief.pdf".into(),
                    content_type: Some("application/pdf".into()),
                    content: b"%PDF-1.4".to_vec(),
                }),
                ..email()
            })
            .unwrap();
        let formatted = formatted(&message);

        assert!(formatted.contains("multipart/mixed"));
        assert!(formatted.contains("Content-Type: application/pdf"));
        assert!(formatted.contains("filename=\"brief.pdf\""));
        assert!(formatted.contains("Hello World!"));
    }

    #[tokio::test]
    async fn attachment_with_invalid_content_type() {
        let message = sut()
            .build_message(Email {
                attachment: Some(EmailAttachment {
                    filename: "notes".into(),
                    content_type: Some("not a mime type".into()),
                    content: b"notes".to_vec(),
                }),
                ..email()
            })
            .unwrap();

        assert!(formatted(&message).contains("Content-Type: application/octet-stream"));
    }
}
