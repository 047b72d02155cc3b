//! Pure transformations for mirror-backed fetching.
//!
//! Nothing in this module performs I/O; every function maps values to values
//! and is tested in isolation.

mod rank;
mod repo;
mod url;

pub use rank::{best, composite_score, rank};
pub use repo::RepoSlug;
pub use url::{KNOWN_MIRROR_PREFIXES, canonicalize, mirror_url};
