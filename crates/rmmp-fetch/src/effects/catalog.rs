use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::cache::CacheStore;
use super::http::HttpClient;
use super::transfer::fetch_bytes;
use crate::core;
use crate::data::{
    CatalogLookup, CatalogOrigin, DEFAULT_CACHE_TTL_HOURS, DirectoryResponse,
    MirrorCatalogSnapshot, MirrorRecord,
};
use crate::error::Result;

/// Public directory listing GitHub acceleration mirrors.
pub const DEFAULT_DIRECTORY_URL: &str = "https://api.akams.cn/github";

/// Mirror catalog backed by a remote directory and a local snapshot.
///
/// A lookup serves the snapshot while it is younger than the TTL and queries
/// the directory otherwise. An unreadable snapshot is treated as absent.
pub struct MirrorCatalog<C, S> {
    client: Arc<C>,
    store: S,
    directory_url: String,
    ttl: Duration,
}

impl<C: HttpClient, S: CacheStore> MirrorCatalog<C, S> {
    pub fn new(client: Arc<C>, store: S) -> Self {
        Self {
            client,
            store,
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            ttl: Duration::hours(DEFAULT_CACHE_TTL_HOURS),
        }
    }

    #[must_use]
    pub fn with_directory_url(mut self, url: impl Into<String>) -> Self {
        self.directory_url = url.into();
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn directory_url(&self) -> &str {
        &self.directory_url
    }

    /// Mirrors in directory order, from the snapshot when fresh.
    pub async fn lookup(&self) -> Result<CatalogLookup> {
        let now = Utc::now();
        if let Some(snapshot) = self.fresh_snapshot(now) {
            let age = snapshot.age_at(now);
            return Ok(CatalogLookup {
                records: snapshot.records,
                origin: CatalogOrigin::Cache { age },
            });
        }
        self.refresh().await
    }

    /// Shorthand for [`lookup`](Self::lookup) when only the records matter.
    pub async fn get_mirrors(&self) -> Result<Vec<MirrorRecord>> {
        Ok(self.lookup().await?.records)
    }

    /// Query the directory unconditionally and replace the snapshot.
    ///
    /// A failed write is logged and reported through the origin; the fetched
    /// records are returned either way.
    pub async fn refresh(&self) -> Result<CatalogLookup> {
        info!(url = %self.directory_url, "querying mirror directory");
        let body = fetch_bytes(self.client.as_ref(), &self.directory_url, None).await?;
        let response = DirectoryResponse::from_slice(&body)?;
        let snapshot = MirrorCatalogSnapshot::from_directory(response, Utc::now());
        debug!(records = snapshot.records.len(), "mirror directory answered");

        let persist_error = match self.store.write(&snapshot) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "mirror cache not updated");
                Some(e)
            }
        };

        Ok(CatalogLookup {
            records: snapshot.records,
            origin: CatalogOrigin::Directory {
                server_updated_at: snapshot.server_updated_at,
                total: snapshot.total,
                persist_error,
            },
        })
    }

    /// The mirror with the highest composite score.
    pub async fn best(&self) -> Result<MirrorRecord> {
        let records = self.get_mirrors().await?;
        core::best(&records).cloned()
    }

    /// Drop the snapshot so the next lookup queries the directory.
    pub fn clear(&self) -> Result<bool> {
        self.store.clear()
    }

    fn fresh_snapshot(&self, now: DateTime<Utc>) -> Option<MirrorCatalogSnapshot> {
        match self.store.read() {
            Ok(Some(snapshot)) if snapshot.is_fresh_at(now, self.ttl) => {
                debug!(fetched_at = %snapshot.fetched_at, "mirror cache hit");
                Some(snapshot)
            }
            Ok(Some(snapshot)) => {
                debug!(fetched_at = %snapshot.fetched_at, "mirror cache expired");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable mirror cache");
                None
            }
        }
    }
}
