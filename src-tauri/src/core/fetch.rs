use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::http::build_http_client;

/// Leaf transport seam: fetch one URL into one destination file.
///
/// The pipeline only ever talks to this trait so tests can swap the
/// network out for a stub.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> InstallerResult<()>;
}

/// Real fetcher backed by a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = build_http_client().expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    /// Download `url` to `dest`, creating parent directories and
    /// truncating any existing file.
    ///
    /// A non-2xx response is an error. No partial-file cleanup happens on
    /// failure; a truncated file may remain at `dest`.
    async fn fetch(&self, url: &str, dest: &Path) -> InstallerResult<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InstallerError::io(parent, e))?;
        }

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallerError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Write to file inside a block to ensure the handle is dropped
        // immediately — critical on Windows.
        {
            let mut file = tokio::fs::File::create(dest)
                .await
                .map_err(|e| InstallerError::io(dest, e))?;

            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk)
                    .await
                    .map_err(|e| InstallerError::io(dest, e))?;
            }
            file.flush().await.map_err(|e| InstallerError::io(dest, e))?;
        }

        debug!("Downloaded: {} -> {:?}", url, dest);
        Ok(())
    }
}
