use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::mirror::{DirectoryResponse, MirrorRecord};

/// How long a persisted mirror catalog is trusted.
pub const DEFAULT_CACHE_TTL_HOURS: i64 = 10;

/// The mirror catalog as persisted between invocations.
///
/// Records keep the order in which the directory returned them. A snapshot
/// is replaced wholesale on every refresh, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorCatalogSnapshot {
    #[serde(rename = "data", default)]
    pub records: Vec<MirrorRecord>,
    #[serde(rename = "cache_time")]
    pub fetched_at: DateTime<Utc>,
    /// The directory's own update marker, echoed for display.
    #[serde(rename = "update_time", default)]
    pub server_updated_at: String,
    #[serde(default)]
    pub total: usize,
}

impl MirrorCatalogSnapshot {
    pub fn from_directory(response: DirectoryResponse, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records: response.data,
            fetched_at,
            server_updated_at: response.update_time,
            total: response.total,
        }
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// A snapshot is usable while `now - fetched_at <= ttl`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age_at(now) <= ttl
    }
}
