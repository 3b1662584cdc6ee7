use std::{io, path::PathBuf};

use anyhow::Context;
use nazaris_shared_contracts::fs::FileSystemService;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemServiceImpl;

impl FileSystemService for FileSystemServiceImpl {
    async fn read_file(&self, path: PathBuf) -> anyhow::Result<Option<Vec<u8>>> {
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => {
                trace!(path = %path.display(), "not a regular file");
                return Ok(None);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to stat {}", path.display()));
            }
        }

        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Some(content)),
            // removed between stat and read
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    async fn is_dir(&self, path: PathBuf) -> bool {
        tokio::fs::metadata(path)
            .await
            .is_ok_and(|metadata| metadata.is_dir())
    }
}
