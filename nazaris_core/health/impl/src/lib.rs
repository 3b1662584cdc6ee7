use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use nazaris_core_health_contracts::{HealthFeatureService, HealthStatus};
use nazaris_email_contracts::EmailService;
use nazaris_shared_contracts::fs::FileSystemService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email, Fs> {
    email: Email,
    fs: Fs,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
    pub site_root: Arc<PathBuf>,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email, Fs> HealthFeatureServiceImpl<Email, Fs> {
    pub fn new(email: Email, fs: Fs, config: HealthFeatureConfig) -> Self {
        Self {
            email,
            fs,
            config,
            state: Default::default(),
        }
    }
}

impl<Email, Fs> HealthFeatureService for HealthFeatureServiceImpl<Email, Fs>
where
    Email: EmailService,
    Fs: FileSystemService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = if self.email.is_enabled() {
            let ok = self
                .email
                .ping()
                .await
                .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
                .is_ok();
            Some(ok)
        } else {
            None
        };

        let site = self.fs.is_dir((*self.config.site_root).clone()).await;
        if !site {
            error!(root = ?self.config.site_root, "Site root is not a directory");
        }

        let status = HealthStatus { email, site };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
