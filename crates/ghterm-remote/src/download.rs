//! File downloads.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use ghterm_core::GitHubConfig;

use crate::error::FetchError;
use crate::github::USER_AGENT;

/// Receives download requests produced by the shell.
///
/// Triggering is fire-and-forget: callers do not wait for the transfer and
/// are not told whether it succeeded.
pub trait DownloadSink: Send + Sync {
    /// Start downloading the file at `locator` in `config`'s repository,
    /// saving it as `suggested_name`.
    fn trigger(&self, config: &GitHubConfig, locator: &str, suggested_name: &str);
}

/// Downloads raw file contents into a local directory.
#[derive(Debug, Clone)]
pub struct RawDownloader {
    client: reqwest::Client,
    dest_dir: PathBuf,
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl RawDownloader {
    /// Create a downloader saving into `dest_dir`.
    pub fn new(dest_dir: impl Into<PathBuf>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, dest_dir))
    }

    /// Create a downloader sharing an existing client.
    pub fn with_client(client: reqwest::Client, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dest_dir: dest_dir.into(),
            in_flight: Arc::default(),
        }
    }

    /// Directory files are saved into.
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Wait for every download started so far.
    pub async fn wait(&self) {
        let handles = match self.in_flight.lock() {
            Ok(mut in_flight) => std::mem::take(&mut *in_flight),
            Err(_) => return,
        };
        for handle in handles {
            let _ = handle.await;
        }
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    pub async fn fetch_to(
        client: &reqwest::Client,
        url: &str,
        token: Option<&str>,
        dest: &Path,
    ) -> Result<u64, FetchError> {
        let mut request = client.get(url);
        if let Some(token) = token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }
        let bytes = response.bytes().await?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FetchError::io(parent, e))?;
        }
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|e| FetchError::io(dest, e))?;

        Ok(bytes.len() as u64)
    }
}

/// Keep only the final component of a suggested name.
fn sanitize_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

impl DownloadSink for RawDownloader {
    /// Must be called from within a Tokio runtime.
    fn trigger(&self, config: &GitHubConfig, locator: &str, suggested_name: &str) {
        let url = config.raw_url(locator);
        let token = config.token.clone().filter(|t| !t.is_empty());
        let dest = self.dest_dir.join(sanitize_name(suggested_name));
        let client = self.client.clone();

        info!(%url, dest = %dest.display(), "download started");
        let handle = tokio::spawn(async move {
            match Self::fetch_to(&client, &url, token.as_deref(), &dest).await {
                Ok(bytes) => info!(%url, bytes, dest = %dest.display(), "download finished"),
                Err(err) => warn!(%url, error = %err, "download failed"),
            }
        });

        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.retain(|task| !task.is_finished());
            in_flight.push(handle);
        }
    }
}
