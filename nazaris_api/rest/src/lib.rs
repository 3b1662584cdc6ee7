use std::{net::IpAddr, sync::Arc};

use axum::{extract::DefaultBodyLimit, Router};
use nazaris_core_contact_contracts::ContactFeatureService;
use nazaris_core_health_contracts::HealthFeatureService;
use nazaris_core_site_contracts::SiteFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact, Site> {
    health: Health,
    contact: Contact,
    site: Site,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Maximum size of a request body in bytes.
    pub max_upload_size: usize,
}

impl<Health, Contact, Site> RestServer<Health, Contact, Site>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
    Site: SiteFeatureService,
{
    pub fn new(health: Health, contact: Contact, site: Site, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            site,
            config,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let RestServerConfig { host, port, .. } = self.config;
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let api = routes::contact::router(Arc::new(self.contact));
        let api = middlewares::cors::add(api);

        let router = Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .nest("/api", api)
            .merge(routes::site::router(Arc::new(self.site)))
            .layer(DefaultBodyLimit::max(self.config.max_upload_size));

        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::panic_handler::add(router)
    }
}
