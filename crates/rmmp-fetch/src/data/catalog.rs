use chrono::Duration;

use super::mirror::MirrorRecord;
use crate::error::FetchError;

/// Where a catalog lookup got its records from.
#[derive(Debug)]
pub enum CatalogOrigin {
    /// A fresh local snapshot; no network access happened.
    Cache { age: Duration },
    /// A directory query. `persist_error` is set when the new snapshot could
    /// not be written; the records are still valid for this invocation.
    Directory {
        server_updated_at: String,
        total: usize,
        persist_error: Option<FetchError>,
    },
}

/// Result of a catalog lookup.
#[derive(Debug)]
pub struct CatalogLookup {
    /// Mirrors in directory order, not ranked.
    pub records: Vec<MirrorRecord>,
    pub origin: CatalogOrigin,
}

impl CatalogLookup {
    pub fn from_cache(&self) -> bool {
        matches!(self.origin, CatalogOrigin::Cache { .. })
    }
}
