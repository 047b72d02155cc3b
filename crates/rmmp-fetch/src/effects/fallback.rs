use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, warn};

use super::cache::CacheStore;
use super::catalog::MirrorCatalog;
use super::http::HttpClient;
use super::transfer;
use crate::core::{canonicalize, mirror_url, rank};
use crate::data::{FallbackEvent, FallbackOptions, ReleaseManifest, TransferProgress};
use crate::error::{FetchError, Result};

/// Direct-then-mirrors fetcher.
///
/// Every fetch is tried against the origin first. On failure the catalog is
/// consulted, ranked by throughput, and at most
/// [`max_mirror_attempts`](FallbackOptions::max_mirror_attempts) mirrors are
/// tried one after another. The first success wins; nothing runs in parallel.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use rmmp_fetch::{FallbackFetcher, FallbackOptions, JsonFileStore, MirrorCatalog, ReqwestClient};
///
/// # async fn run() -> rmmp_fetch::Result<()> {
/// let client = Arc::new(ReqwestClient::new().expect("client"));
/// let catalog = MirrorCatalog::new(client.clone(), JsonFileStore::new("/tmp/proxies.json"));
/// let fetcher = FallbackFetcher::new(client, catalog, FallbackOptions::default());
///
/// let manifest = fetcher
///     .fetch_manifest("https://github.com/owner/repo/releases/latest/download/update.json")
///     .await?;
/// println!("{} ({})", manifest.version, manifest.version_code);
/// # Ok(())
/// # }
/// ```
pub struct FallbackFetcher<C, S> {
    client: Arc<C>,
    catalog: MirrorCatalog<C, S>,
    options: FallbackOptions,
}

impl<C: HttpClient, S: CacheStore> FallbackFetcher<C, S> {
    pub fn new(client: Arc<C>, catalog: MirrorCatalog<C, S>, options: FallbackOptions) -> Self {
        Self {
            client,
            catalog,
            options,
        }
    }

    pub fn catalog(&self) -> &MirrorCatalog<C, S> {
        &self.catalog
    }

    pub fn options(&self) -> &FallbackOptions {
        &self.options
    }

    /// Fetch and parse a release manifest.
    ///
    /// A manifest that downloads fine but does not parse is not retried
    /// through mirrors; they serve the same bytes.
    pub async fn fetch_manifest(&self, url: &str) -> Result<ReleaseManifest> {
        let body = self.fetch_bytes(url, self.options.manifest_timeout).await?;
        ReleaseManifest::from_slice(&body)
    }

    /// Download a module archive to `dest`.
    ///
    /// A mirror prefix already present in `url` is stripped first, so the
    /// direct attempt always goes to the origin.
    pub async fn fetch_payload(
        &self,
        url: &str,
        dest: &Path,
        on_progress: Option<&(dyn Fn(&TransferProgress) + Send + Sync)>,
    ) -> Result<u64> {
        let canonical = canonicalize(url);
        if canonical != url {
            info!(from = url, to = canonical, "stripped mirror prefix from payload url");
        }
        self.fetch_file(canonical, dest, self.options.payload_timeout, on_progress)
            .await
    }

    /// Buffered fetch through the fallback chain with a per-attempt deadline.
    pub async fn fetch_bytes(&self, url: &str, timeout: Duration) -> Result<Bytes> {
        let client = self.client.as_ref();
        self.with_fallback(url, |target| async move {
            transfer::fetch_bytes(client, &target, Some(timeout)).await
        })
        .await
    }

    /// Streaming fetch into `dest` through the fallback chain.
    ///
    /// Every attempt recreates `dest`, so a partial body from a failed
    /// attempt never survives into the result.
    pub async fn fetch_file(
        &self,
        url: &str,
        dest: &Path,
        timeout: Duration,
        on_progress: Option<&(dyn Fn(&TransferProgress) + Send + Sync)>,
    ) -> Result<u64> {
        let client = self.client.as_ref();
        self.with_fallback(url, |target| async move {
            transfer::fetch_to_file(client, &target, dest, Some(timeout), on_progress).await
        })
        .await
    }

    async fn with_fallback<T, F, Fut>(&self, url: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempts = 1;
        self.options.emit(FallbackEvent::DirectAttempt {
            url: url.to_string(),
        });

        let mut last_error = match attempt(url.to_string()).await {
            Ok(value) => {
                self.options.emit(FallbackEvent::Succeeded {
                    url: url.to_string(),
                    mirror: None,
                });
                return Ok(value);
            }
            Err(e) => {
                warn!(url, error = %e, "direct fetch failed, falling back to mirrors");
                self.options.emit(FallbackEvent::DirectFailed {
                    url: url.to_string(),
                    error: e.to_string(),
                });
                e
            }
        };

        let mirrors = match self.catalog.get_mirrors().await {
            Ok(records) => rank(&records),
            Err(e) => {
                warn!(error = %e, "mirror catalog unavailable");
                self.options.emit(FallbackEvent::CatalogUnavailable {
                    error: e.to_string(),
                });
                return Err(exhausted(attempts, last_error));
            }
        };

        let ceiling = self.options.max_mirror_attempts.min(mirrors.len());
        debug!(available = mirrors.len(), ceiling, "walking mirrors");

        for (index, mirror) in mirrors.into_iter().take(ceiling).enumerate() {
            let target = mirror_url(&mirror.url, url);
            attempts += 1;
            self.options.emit(FallbackEvent::MirrorAttempt {
                attempt: index + 1,
                ceiling,
                mirror: mirror.clone(),
                url: target.clone(),
            });

            match attempt(target.clone()).await {
                Ok(value) => {
                    info!(mirror = %mirror.url, "mirror fetch succeeded");
                    self.options.emit(FallbackEvent::Succeeded {
                        url: target,
                        mirror: Some(mirror),
                    });
                    return Ok(value);
                }
                Err(e) => {
                    debug!(mirror = %mirror.url, error = %e, "mirror fetch failed");
                    self.options.emit(FallbackEvent::MirrorFailed {
                        mirror,
                        error: e.to_string(),
                    });
                    last_error = e;
                }
            }
        }

        Err(exhausted(attempts, last_error))
    }
}

fn exhausted(attempts: usize, last: FetchError) -> FetchError {
    FetchError::AllAttemptsExhausted {
        attempts,
        last: Some(Box::new(last)),
    }
}
