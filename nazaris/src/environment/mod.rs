use std::sync::Arc;

use nazaris_api_rest::RestServerConfig;
use nazaris_config::Config;
use nazaris_core_contact_impl::ContactFeatureConfig;
use nazaris_core_health_impl::HealthFeatureConfig;
use nazaris_core_site_impl::SiteFeatureConfig;
use types::{Contact, Email, FileSystem, Health, RestServer, Site};

use crate::email;

pub mod types;

/// The configuration of every service, derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    // API
    rest_server_config: RestServerConfig,

    // Core
    contact_feature_config: ContactFeatureConfig,
    health_feature_config: HealthFeatureConfig,
    site_feature_config: SiteFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let site_root = Arc::new(config.site.root.clone());

        Self {
            rest_server_config: RestServerConfig {
                host: config.http.host,
                port: config.http.port,
                max_upload_size: config.http.max_upload_size,
            },
            contact_feature_config: ContactFeatureConfig {
                recipient: email::recipient(&config.contact).into(),
            },
            health_feature_config: HealthFeatureConfig {
                cache_ttl: *config.health.cache_ttl,
                site_root: Arc::clone(&site_root),
            },
            site_feature_config: SiteFeatureConfig {
                root: site_root,
                icon_dirs: config.site.resolved_icon_dirs().into(),
                base_url: config.site.base_url.clone().into(),
            },
        }
    }
}

/// Wires up the services behind the REST server.
pub struct Provider {
    config: ConfigProvider,
    email: Email,
    fs: FileSystem,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            config,
            email,
            fs: FileSystem::default(),
        }
    }

    pub fn rest_server(self) -> RestServer {
        let contact = Contact::new(self.email.clone(), self.config.contact_feature_config);
        let health = Health::new(self.email, self.fs, self.config.health_feature_config);
        let site = Site::new(self.fs, self.config.site_feature_config);

        RestServer::new(health, contact, site, self.config.rest_server_config)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use nazaris_email_impl::EmailServiceImpl;

    use super::*;

    #[tokio::test]
    async fn provide_rest_server() {
        let config = nazaris_config::load_with_overrides(&[] as &[&Path], &[]).unwrap();
        let config_provider = ConfigProvider::new(&config);
        let provider = Provider::new(config_provider, EmailServiceImpl::dummy());
        let _: RestServer = provider.rest_server();
    }

    #[test]
    fn config_provider_derives_service_configs() {
        let config = nazaris_config::load_with_overrides(
            &[] as &[&Path],
            &[
                ("http.port", "9000".into()),
                ("site.root", "/srv/www".into()),
            ],
        )
        .unwrap();

        let config_provider = ConfigProvider::new(&config);

        assert_eq!(config_provider.rest_server_config.port, 9000);
        assert_eq!(
            *config_provider.site_feature_config.root,
            Path::new("/srv/www")
        );
        assert_eq!(
            config_provider.health_feature_config.site_root,
            config_provider.site_feature_config.root
        );
        assert_eq!(
            config_provider.contact_feature_config.recipient.0.email.to_string(),
            "nazaris@internet.ru"
        );
    }
}
