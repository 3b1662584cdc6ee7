use std::{future::Future, path::PathBuf};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FileSystemService: Send + Sync + 'static {
    /// Reads the regular file at `path`.
    ///
    /// Returns `None` if nothing exists at `path` or if it is not a regular
    /// file.
    fn read_file(
        &self,
        path: PathBuf,
    ) -> impl Future<Output = anyhow::Result<Option<Vec<u8>>>> + Send;

    /// Returns whether `path` exists and is a directory.
    fn is_dir(&self, path: PathBuf) -> impl Future<Output = bool> + Send;
}

#[cfg(feature = "mock")]
impl MockFileSystemService {
    pub fn with_read_file(mut self, path: impl Into<PathBuf>, result: Option<Vec<u8>>) -> Self {
        self.expect_read_file()
            .once()
            .with(mockall::predicate::eq(path.into()))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_is_dir(mut self, path: impl Into<PathBuf>, result: bool) -> Self {
        self.expect_is_dir()
            .once()
            .with(mockall::predicate::eq(path.into()))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
