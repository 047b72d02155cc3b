//! Immutable data types for mirror-backed fetching.
//!
//! Everything here is a plain value: records received from the mirror
//! directory, the snapshot persisted between invocations, the parsed release
//! manifest and the knobs of the fallback chain.

pub mod catalog;
pub mod manifest;
pub mod mirror;
pub mod options;
pub mod progress;
pub mod snapshot;

pub use catalog::{CatalogLookup, CatalogOrigin};
pub use manifest::ReleaseManifest;
pub use mirror::{DirectoryResponse, MirrorRecord};
pub use options::{EventCallback, FallbackOptions};
pub use progress::{FallbackEvent, TransferProgress};
pub use snapshot::{DEFAULT_CACHE_TTL_HOURS, MirrorCatalogSnapshot};
