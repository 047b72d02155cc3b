//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rmmp_fetch::{
    CacheStore, FallbackFetcher, FallbackOptions, FetchError, HttpClient, HttpResponse,
    MirrorCatalog, MirrorCatalogSnapshot, MirrorRecord,
};

pub const DIRECTORY: &str = "https://directory.test/github";

/// What the mock answers for a given URL.
#[derive(Debug, Clone)]
pub enum Reply {
    Body { status: u16, chunks: Vec<Vec<u8>> },
    Fail(String),
    Hang,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Reply::Body {
            status: 200,
            chunks: vec![body.into()],
        }
    }

    pub fn chunked(chunks: Vec<Vec<u8>>) -> Self {
        Reply::Body {
            status: 200,
            chunks,
        }
    }

    pub fn status(status: u16) -> Self {
        Reply::Body {
            status,
            chunks: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct MockError(String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockError {}

/// Scripted HTTP client that records every requested URL.
///
/// URLs without a scripted reply answer with a connection failure.
#[derive(Debug, Default)]
pub struct MockClient {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, url: impl Into<String>, reply: Reply) -> &Self {
        self.replies.lock().unwrap().insert(url.into(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn get(
        &self,
        url: &str,
        _timeout: Option<Duration>,
    ) -> Result<HttpResponse<Self::Error>, Self::Error> {
        self.calls.lock().unwrap().push(url.to_string());
        let reply = self.replies.lock().unwrap().get(url).cloned();

        match reply {
            Some(Reply::Body { status, chunks }) => {
                let total: usize = chunks.iter().map(Vec::len).sum();
                let items = chunks.into_iter().map(|c| Ok(Bytes::from(c)));
                Ok(HttpResponse {
                    status,
                    content_length: Some(total as u64),
                    body: Box::pin(futures_util::stream::iter(items)),
                })
            }
            Some(Reply::Fail(reason)) => Err(MockError(reason)),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(MockError(format!("connection refused: {url}"))),
        }
    }
}

/// In-memory snapshot store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<MirrorCatalogSnapshot>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(snapshot: MirrorCatalogSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            fail_writes: false,
        }
    }

    pub fn read_only() -> Self {
        Self {
            snapshot: Mutex::new(None),
            fail_writes: true,
        }
    }

    pub fn current(&self) -> Option<MirrorCatalogSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self) -> rmmp_fetch::Result<Option<MirrorCatalogSnapshot>> {
        Ok(self.current())
    }

    fn write(&self, snapshot: &MirrorCatalogSnapshot) -> rmmp_fetch::Result<()> {
        if self.fail_writes {
            return Err(FetchError::CachePersist {
                path: "/read-only/proxies.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> rmmp_fetch::Result<bool> {
        Ok(self.snapshot.lock().unwrap().take().is_some())
    }
}

pub fn snapshot_at(records: Vec<MirrorRecord>, fetched_at: DateTime<Utc>) -> MirrorCatalogSnapshot {
    let total = records.len();
    MirrorCatalogSnapshot {
        records,
        fetched_at,
        server_updated_at: "2024-10-01 08:00:00".into(),
        total,
    }
}

pub fn fresh_snapshot(records: Vec<MirrorRecord>) -> MirrorCatalogSnapshot {
    snapshot_at(records, Utc::now())
}

/// Directory payload in the service's wire format.
pub fn directory_body(records: &[MirrorRecord]) -> String {
    serde_json::json!({
        "code": 200,
        "msg": "success",
        "data": records,
        "total": records.len(),
        "update_time": "2024-10-01 08:00:00",
    })
    .to_string()
}

pub fn manifest_body(zip_url: &str) -> String {
    serde_json::json!({
        "version": "v1.2.0",
        "versionCode": 120,
        "zipUrl": zip_url,
        "changelog": "",
    })
    .to_string()
}

pub fn catalog(
    client: &Arc<MockClient>,
    store: MemoryStore,
) -> MirrorCatalog<MockClient, MemoryStore> {
    MirrorCatalog::new(client.clone(), store).with_directory_url(DIRECTORY)
}

pub fn fetcher(
    client: &Arc<MockClient>,
    store: MemoryStore,
    options: FallbackOptions,
) -> FallbackFetcher<MockClient, MemoryStore> {
    FallbackFetcher::new(client.clone(), catalog(client, store), options)
}
