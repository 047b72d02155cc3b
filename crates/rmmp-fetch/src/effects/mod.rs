//! I/O operations behind trait abstractions.
//!
//! - [`HttpClient`] is the only way this crate touches the network.
//! - [`CacheStore`] is the only way it touches the persisted mirror catalog.
//!
//! Both are injected at construction, so tests swap in in-memory doubles.

mod cache;
mod catalog;
mod fallback;
mod http;
mod transfer;

pub use cache::{CacheStore, JsonFileStore};
pub use catalog::{DEFAULT_DIRECTORY_URL, MirrorCatalog};
pub use fallback::FallbackFetcher;
pub use http::{BoxStream, HttpClient, HttpResponse};
pub use transfer::{fetch_bytes, fetch_to_file};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
