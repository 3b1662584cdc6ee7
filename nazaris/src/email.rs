use anyhow::Context;
use nazaris_config::{ContactConfig, EmailConfig};
use nazaris_email_impl::{EmailServiceImpl, SmtpTls};
use nazaris_models::email_address::EmailAddressWithName;

/// Create the email service for the configured SMTP relay
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let from = sender(config)?;

    EmailServiceImpl::new(
        &config.host,
        config.port,
        SmtpTls::from_secure(config.secure),
        &config.user,
        password(config),
        from,
    )
    .context("Failed to create SMTP transport")
}

/// An empty password disables sending emails, just like a missing one.
pub fn password(config: &EmailConfig) -> Option<&str> {
    config.password.as_deref().filter(|password| !password.is_empty())
}

/// The SMTP account doubles as the sender address.
fn sender(config: &EmailConfig) -> anyhow::Result<EmailAddressWithName> {
    config
        .user
        .parse()
        .with_context(|| format!("Invalid sender address {}", config.user))
}

/// The mailbox receiving contact form submissions
pub fn recipient(config: &ContactConfig) -> EmailAddressWithName {
    config.email.clone().into()
}
