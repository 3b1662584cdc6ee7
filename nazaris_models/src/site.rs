use std::path::Path;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file of the static site, ready to be served.
#[derive(Clone, PartialEq, Eq)]
pub struct SiteFile {
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

impl SiteFile {
    /// Creates a site file whose content type is derived from `path`.
    pub fn from_path(path: &Path, content: Vec<u8>) -> Self {
        Self {
            content,
            content_type: content_type_for(path),
        }
    }
}

impl std::fmt::Debug for SiteFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteFile")
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Maps the extension of `path` to a content type. Unknown or missing
/// extensions map to [`DEFAULT_CONTENT_TYPE`].
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };

    match extension.to_ascii_lowercase().as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "ico" => "image/x-icon",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "xml" => "application/xml",
        "txt" => "text/plain",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("icon/logo.SVG")), "image/svg+xml");
        assert_eq!(content_type_for(Path::new("photo.jpeg")), "image/jpeg");
    }

    #[test]
    fn unknown_extensions() {
        assert_eq!(content_type_for(Path::new("font.woff2")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
    }
}
