use anyhow::ensure;
use clap::Subcommand;
use nazaris_config::Config;
use nazaris_email_contracts::{ContentType, Email, EmailService};
use nazaris_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;
    ensure!(
        email_service.is_enabled(),
        "Sending emails is disabled, set EMAIL_PASS to enable it"
    );

    let ok = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
            attachment: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
