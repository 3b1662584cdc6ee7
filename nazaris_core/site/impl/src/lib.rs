use std::{
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use nazaris_core_site_contracts::{SiteFeatureService, SiteGetFileError};
use nazaris_models::site::SiteFile;
use nazaris_shared_contracts::fs::FileSystemService;
use tracing::trace;
use url::Url;

const INDEX_FILE: &str = "index.html";
const SITEMAP_FILE: &str = "sitemap.xml";
const ROBOTS_FILE: &str = "robots.txt";

#[derive(Debug, Clone)]
pub struct SiteFeatureServiceImpl<Fs> {
    fs: Fs,
    config: SiteFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct SiteFeatureConfig {
    pub root: Arc<PathBuf>,
    /// Searched in order when resolving `/icon/*` requests.
    pub icon_dirs: Arc<Vec<PathBuf>>,
    pub base_url: Arc<Url>,
}

impl<Fs> SiteFeatureServiceImpl<Fs> {
    pub fn new(fs: Fs, config: SiteFeatureConfig) -> Self {
        Self { fs, config }
    }
}

impl<Fs> SiteFeatureService for SiteFeatureServiceImpl<Fs>
where
    Fs: FileSystemService,
{
    async fn get_page(&self, path: String) -> Result<SiteFile, SiteGetFileError> {
        let relative = match path.trim_start_matches('/') {
            "" => Path::new(INDEX_FILE),
            relative => safe_relative_path(relative)?,
        };

        let path = self.config.root.join(relative);
        self.read(path).await
    }

    async fn get_icon(&self, name: String) -> Result<SiteFile, SiteGetFileError> {
        if name.contains("..") {
            return Err(SiteGetFileError::Forbidden);
        }
        let name = safe_relative_path(&name)?;

        for dir in self.config.icon_dirs.iter() {
            let path = dir.join(name);
            if let Some(content) = self.fs.read_file(path.clone()).await? {
                return Ok(SiteFile::from_path(&path, content));
            }
        }

        trace!(?name, "icon not found in any icon directory");
        Err(SiteGetFileError::NotFound)
    }

    async fn get_sitemap(&self) -> Result<SiteFile, SiteGetFileError> {
        let path = self.config.root.join(SITEMAP_FILE);
        self.read(path).await
    }

    async fn get_robots(&self) -> anyhow::Result<SiteFile> {
        let path = self.config.root.join(ROBOTS_FILE);
        let content = match self.fs.read_file(path.clone()).await? {
            Some(content) => content,
            None => default_robots(&self.config.base_url).into_bytes(),
        };

        Ok(SiteFile::from_path(&path, content))
    }
}

impl<Fs> SiteFeatureServiceImpl<Fs>
where
    Fs: FileSystemService,
{
    async fn read(&self, path: PathBuf) -> Result<SiteFile, SiteGetFileError> {
        match self.fs.read_file(path.clone()).await? {
            Some(content) => Ok(SiteFile::from_path(&path, content)),
            None => Err(SiteGetFileError::NotFound),
        }
    }
}

/// Rejects anything that could resolve outside of the directory it is joined
/// onto.
fn safe_relative_path(path: &str) -> Result<&Path, SiteGetFileError> {
    if path.contains('\0') {
        return Err(SiteGetFileError::Forbidden);
    }

    let path = Path::new(path);
    if !path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(SiteGetFileError::Forbidden);
    }

    Ok(path)
}

fn default_robots(base_url: &Url) -> String {
    let base_url = base_url.as_str().trim_end_matches('/');
    format!("User-agent: *\nAllow: /\nSitemap: {base_url}/sitemap.xml\n")
}

#[cfg(test)]
mod tests {
    use nazaris_shared_contracts::fs::MockFileSystemService;
    use nazaris_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn get_page_index() {
        // Arrange
        let fs = MockFileSystemService::new()
            .with_read_file("/srv/site/index.html", Some(b"<html></html>".to_vec()));

        let sut = make_sut(fs);

        // Act
        let result = sut.get_page("/".into()).await;

        // Assert
        let file = result.unwrap();
        assert_eq!(file.content, b"<html></html>");
        assert_eq!(file.content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn get_page_nested() {
        // Arrange
        let fs = MockFileSystemService::new()
            .with_read_file("/srv/site/css/style.css", Some(b"body {}".to_vec()));

        let sut = make_sut(fs);

        // Act
        let result = sut.get_page("/css/style.css".into()).await;

        // Assert
        let file = result.unwrap();
        assert_eq!(file.content, b"body {}");
        assert_eq!(file.content_type, "text/css");
    }

    #[tokio::test]
    async fn get_page_not_found() {
        // Arrange
        let fs = MockFileSystemService::new().with_read_file("/srv/site/missing.html", None);

        let sut = make_sut(fs);

        // Act
        let result = sut.get_page("/missing.html".into()).await;

        // Assert
        assert_matches!(result, Err(SiteGetFileError::NotFound));
    }

    #[tokio::test]
    async fn get_page_traversal() {
        for path in ["/../secret.txt", "/css/../../etc/passwd", "/a\0b"] {
            // Arrange
            let sut = make_sut(MockFileSystemService::new());

            // Act
            let result = sut.get_page(path.into()).await;

            // Assert
            assert_matches!(result, Err(SiteGetFileError::Forbidden));
        }
    }

    #[tokio::test]
    async fn get_icon_first_directory_wins() {
        // Arrange
        let fs = MockFileSystemService::new()
            .with_read_file("/srv/icon/logo.svg", Some(b"<svg/>".to_vec()));

        let sut = make_sut(fs);

        // Act
        let result = sut.get_icon("logo.svg".into()).await;

        // Assert
        let file = result.unwrap();
        assert_eq!(file.content, b"<svg/>");
        assert_eq!(file.content_type, "image/svg+xml");
    }

    #[tokio::test]
    async fn get_icon_falls_back_to_site_icons() {
        // Arrange
        let fs = MockFileSystemService::new()
            .with_read_file("/srv/icon/logo.png", None)
            .with_read_file("/srv/site/icon/logo.png", Some(b"png".to_vec()));

        let sut = make_sut(fs);

        // Act
        let result = sut.get_icon("logo.png".into()).await;

        // Assert
        let file = result.unwrap();
        assert_eq!(file.content, b"png");
        assert_eq!(file.content_type, "image/png");
    }

    #[tokio::test]
    async fn get_icon_not_found() {
        // Arrange
        let fs = MockFileSystemService::new()
            .with_read_file("/srv/icon/logo.png", None)
            .with_read_file("/srv/site/icon/logo.png", None);

        let sut = make_sut(fs);

        // Act
        let result = sut.get_icon("logo.png".into()).await;

        // Assert
        assert_matches!(result, Err(SiteGetFileError::NotFound));
    }

    #[tokio::test]
    async fn get_icon_traversal() {
        for name in ["../../etc/passwd", "a..b.png", "/etc/passwd"] {
            // Arrange
            let sut = make_sut(MockFileSystemService::new());

            // Act
            let result = sut.get_icon(name.into()).await;

            // Assert
            assert_matches!(result, Err(SiteGetFileError::Forbidden));
        }
    }

    #[tokio::test]
    async fn get_sitemap() {
        // Arrange
        let fs = MockFileSystemService::new()
            .with_read_file("/srv/site/sitemap.xml", Some(b"<urlset/>".to_vec()));

        let sut = make_sut(fs);

        // Act
        let result = sut.get_sitemap().await;

        // Assert
        let file = result.unwrap();
        assert_eq!(file.content, b"<urlset/>");
        assert_eq!(file.content_type, "application/xml");
    }

    #[tokio::test]
    async fn get_sitemap_not_found() {
        // Arrange
        let fs = MockFileSystemService::new().with_read_file("/srv/site/sitemap.xml", None);

        let sut = make_sut(fs);

        // Act
        let result = sut.get_sitemap().await;

        // Assert
        assert_matches!(result, Err(SiteGetFileError::NotFound));
    }

    #[tokio::test]
    async fn get_robots_from_file() {
        // Arrange
        let fs = MockFileSystemService::new()
            .with_read_file("/srv/site/robots.txt", Some(b"User-agent: *\n".to_vec()));

        let sut = make_sut(fs);

        // Act
        let result = sut.get_robots().await;

        // Assert
        let file = result.unwrap();
        assert_eq!(file.content, b"User-agent: *\n");
        assert_eq!(file.content_type, "text/plain");
    }

    #[tokio::test]
    async fn get_robots_default() {
        // Arrange
        let fs = MockFileSystemService::new().with_read_file("/srv/site/robots.txt", None);

        let sut = make_sut(fs);

        // Act
        let result = sut.get_robots().await;

        // Assert
        let file = result.unwrap();
        assert_eq!(
            String::from_utf8(file.content).unwrap(),
            "User-agent: *\nAllow: /\nSitemap: https://nazaris.ru/sitemap.xml\n"
        );
        assert_eq!(file.content_type, "text/plain");
    }

    fn make_sut(fs: MockFileSystemService) -> SiteFeatureServiceImpl<MockFileSystemService> {
        SiteFeatureServiceImpl::new(
            fs,
            SiteFeatureConfig {
                root: PathBuf::from("/srv/site").into(),
                icon_dirs: vec!["/srv/icon".into(), "/srv/site/icon".into()].into(),
                base_url: Url::parse("https://nazaris.ru").unwrap().into(),
            },
        )
    }
}
