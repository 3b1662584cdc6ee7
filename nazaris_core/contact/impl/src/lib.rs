use std::sync::Arc;

use nazaris_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use nazaris_email_contracts::{ContentType, Email, EmailAttachment, EmailService};
use nazaris_models::{
    contact::{ContactAttachment, ContactSubmission},
    email_address::EmailAddressWithName,
};
use tracing::{info, warn};

mod message;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<EmailS> {
    email: EmailS,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// The mailbox receiving the submissions.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactSubmitError> {
        if !self.email.is_enabled() {
            warn!("rejecting contact submission, sending emails is not configured");
            return Err(ContactSubmitError::NotConfigured);
        }

        let attachment = submission
            .attachment
            .as_ref()
            .filter(|attachment| !attachment.is_empty());

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: message::subject(&submission),
            body: message::body(&submission, attachment),
            content_type: ContentType::Text,
            reply_to: submission.email.parse().ok(),
            attachment: attachment.cloned().map(into_email_attachment),
        };

        if !self.email.send(email).await? {
            return Err(ContactSubmitError::Send);
        }

        info!(
            work_type = submission.work_type.as_str(),
            attachment = attachment.is_some(),
            "relayed contact submission"
        );

        Ok(())
    }
}

fn into_email_attachment(attachment: ContactAttachment) -> EmailAttachment {
    EmailAttachment {
        filename: attachment.filename,
        content_type: attachment.content_type,
        content: attachment.content,
    }
}
