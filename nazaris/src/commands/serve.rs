use nazaris_config::Config;
use nazaris_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;
    if email.is_enabled() {
        info!("Connecting to smtp server");
        if let Err(err) = email.ping().await {
            warn!("Failed to reach smtp server, contact submissions will fail: {err}");
        }
    } else {
        warn!("EMAIL_PASS is not set, contact form submissions will not be sent");
    }

    if !config.site.root.is_dir() {
        warn!(
            "Site root {} is not a directory, static pages will not be served",
            config.site.root.display()
        );
    }

    let config_provider = ConfigProvider::new(&config);
    let provider = Provider::new(config_provider, email);
    let server = provider.rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
