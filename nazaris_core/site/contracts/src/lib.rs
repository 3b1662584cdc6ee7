use std::future::Future;

use nazaris_models::site::SiteFile;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SiteFeatureService: Send + Sync + 'static {
    /// Returns the page at the given request path. `/` is the index document.
    fn get_page(
        &self,
        path: String,
    ) -> impl Future<Output = Result<SiteFile, SiteGetFileError>> + Send;

    /// Returns the icon with the given name from the first icon directory
    /// that contains it.
    fn get_icon(
        &self,
        name: String,
    ) -> impl Future<Output = Result<SiteFile, SiteGetFileError>> + Send;

    fn get_sitemap(&self) -> impl Future<Output = Result<SiteFile, SiteGetFileError>> + Send;

    /// Returns `robots.txt`, falling back to a generated default.
    fn get_robots(&self) -> impl Future<Output = anyhow::Result<SiteFile>> + Send;
}

#[derive(Debug, Error)]
pub enum SiteGetFileError {
    #[error("The path escapes the site root.")]
    Forbidden,
    #[error("The file could not be found.")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSiteFeatureService {
    pub fn with_get_page(
        mut self,
        path: impl Into<String>,
        result: Result<SiteFile, SiteGetFileError>,
    ) -> Self {
        self.expect_get_page()
            .once()
            .with(mockall::predicate::eq(path.into()))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get_icon(
        mut self,
        name: impl Into<String>,
        result: Result<SiteFile, SiteGetFileError>,
    ) -> Self {
        self.expect_get_icon()
            .once()
            .with(mockall::predicate::eq(name.into()))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get_sitemap(mut self, result: Result<SiteFile, SiteGetFileError>) -> Self {
        self.expect_get_sitemap()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get_robots(mut self, result: SiteFile) -> Self {
        self.expect_get_robots()
            .once()
            .return_once(move || Box::pin(std::future::ready(Ok(result))));
        self
    }
}
