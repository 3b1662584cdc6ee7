use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use nazaris_client::{
    api::{ContactClient, DEFAULT_ENDPOINT},
    controller::{ContactFormController, FormMessage},
    form::{ContactForm, FormFile},
};
use nazaris_config::Config;
use tracing::info;
use url::Url;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Name of the submitter
    #[arg(long)]
    name: String,
    /// Phone number, formatted as +7 (XXX) XXX-XX-XX before submitting
    #[arg(long)]
    phone: String,
    /// Email address of the submitter
    #[arg(long)]
    email: String,
    /// Requested kind of work, e.g. web-dev or bots
    #[arg(long)]
    work_type: String,
    /// Planned budget
    #[arg(long)]
    budget: Option<String>,
    /// Additional information
    #[arg(long)]
    message: Option<String>,
    /// File to attach
    #[arg(long)]
    file: Option<PathBuf>,
    /// URL of the contact form endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,
}

pub async fn submit(config: Config, args: SubmitArgs) -> anyhow::Result<()> {
    let file = match &args.file {
        Some(path) => Some(
            FormFile::from_path(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let mut form = ContactForm {
        name: args.name,
        email: args.email,
        work_type: args.work_type,
        budget: args.budget.unwrap_or_default(),
        message: args.message.unwrap_or_default(),
        file,
        ..Default::default()
    };
    form.input_phone(&args.phone);

    let client = ContactClient::new(args.endpoint)?;
    info!(endpoint = %client.endpoint(), "submitting contact form");
    let controller = ContactFormController::new(client, config.contact.email.as_str());

    let message = controller.handle_submit(&mut form).await;
    match &message {
        FormMessage::Invalid { field, message } => {
            anyhow::bail!("{message} ({field:?})")
        }
        FormMessage::Success => println!("{}", message.to_html()),
        FormMessage::Fallback(fallback) => {
            eprintln!("{}", message.to_html());
            println!("{}", fallback.mailto);
            println!("{}", fallback.tel);
            anyhow::bail!("Failed to submit the contact form");
        }
    }

    Ok(())
}
