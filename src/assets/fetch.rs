use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::foundation::error::{ReelError, ReelResult};

/// Retrieves a remote resource and writes it verbatim to a local path.
///
/// Implementations must create missing parent directories and must not leave a partial file at
/// `dest` when they fail.
pub trait AssetFetcher: Send + Sync {
    /// Download `url` into `dest`.
    fn fetch(&self, url: &str, dest: &Path) -> ReelResult<()>;
}

/// Blocking HTTP(S) fetcher backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> ReelResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("storyreel/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ReelError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> ReelResult<()> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ReelError::asset_fetch(url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReelError::asset_fetch(
                url,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        let mut response = self
            .client
            .get(parsed)
            .send()
            .map_err(|e| ReelError::asset_fetch(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReelError::asset_fetch(url, format!("HTTP status {status}")));
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ReelError::asset_fetch(url, format!("create '{}': {e}", parent.display()))
            })?;
        }

        let written = File::create(dest)
            .map_err(|e| format!("create '{}': {e}", dest.display()))
            .and_then(|file| {
                let mut out = BufWriter::new(file);
                let n = response
                    .copy_to(&mut out)
                    .map_err(|e| format!("read body: {e}"))?;
                out.into_inner()
                    .map_err(|e| format!("flush '{}': {}", dest.display(), e.error()))?;
                Ok(n)
            });

        match written {
            Ok(bytes) => {
                debug!(url, path = %dest.display(), bytes, "asset fetched");
                Ok(())
            }
            Err(reason) => {
                let _ = std::fs::remove_file(dest);
                Err(ReelError::asset_fetch(url, reason))
            }
        }
    }
}
