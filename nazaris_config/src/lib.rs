use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use nazaris_models::email_address::EmailAddress;
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

/// Colon separated list of additional config files, applied in order on top
/// of the default config.
pub const CONFIG_PATHS_ENV: &str = "NAZARIS_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Environment variables that override single config keys.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "http.port"),
    ("SMTP_HOST", "email.host"),
    ("SMTP_PORT", "email.port"),
    ("SMTP_SECURE", "email.secure"),
    ("EMAIL_USER", "email.user"),
    ("EMAIL_PASS", "email.password"),
    ("EMAIL_TO", "contact.email"),
    ("SITE_ROOT", "site.root"),
];

/// Loads the config from the default config, the files listed in
/// [`CONFIG_PATHS_ENV`] and the environment variables in [`ENV_OVERRIDES`].
/// Empty environment variables are ignored.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_ENV)
        .map(|paths| {
            paths
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let overrides = ENV_OVERRIDES
        .iter()
        .filter_map(|&(var, key)| {
            std::env::var(var)
                .ok()
                .filter(|value| !value.is_empty())
                .map(|value| (key, value))
        })
        .collect::<Vec<_>>();

    load_with_overrides(&paths, &overrides)
}

pub fn load_with_overrides(
    paths: &[impl AsRef<Path>],
    overrides: &[(&str, String)],
) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    overrides
        .iter()
        .try_fold(builder, |builder, (key, value)| {
            builder
                .set_override(*key, value.as_str())
                .with_context(|| format!("Failed to override {key}"))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub site: SiteConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub max_upload_size: usize,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub email: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub icon_dirs: Vec<PathBuf>,
    pub base_url: Url,
}

impl SiteConfig {
    /// The icon directories resolved against the site root.
    pub fn resolved_icon_dirs(&self) -> Vec<PathBuf> {
        self.icon_dirs
            .iter()
            .map(|dir| self.root.join(dir))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
