//! Resilient fetching of release manifests and module archives.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable records, snapshots, manifests and options
//! - [`core`] - Pure transformations (ranking, URL rewriting, slugs)
//! - [`effects`] - I/O operations behind the [`HttpClient`] and [`CacheStore`] traits
//!
//! # Fallback chain
//!
//! Every fetch first goes straight to the origin. Only when that fails is the
//! mirror catalog consulted (served from a cache that stays fresh for ten
//! hours), ranked by throughput, and walked in order until one mirror answers.
//! Attempts are strictly sequential and each one carries its own deadline.

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use core::{
    KNOWN_MIRROR_PREFIXES, RepoSlug, best, canonicalize, composite_score, mirror_url, rank,
};
pub use data::{
    CatalogLookup, CatalogOrigin, DEFAULT_CACHE_TTL_HOURS, DirectoryResponse, EventCallback,
    FallbackEvent, FallbackOptions, MirrorCatalogSnapshot, MirrorRecord, ReleaseManifest,
    TransferProgress,
};
pub use effects::{
    BoxStream, CacheStore, DEFAULT_DIRECTORY_URL, FallbackFetcher, HttpClient, HttpResponse,
    JsonFileStore, MirrorCatalog, fetch_bytes, fetch_to_file,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{FetchError, Result};
