use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::data::MirrorCatalogSnapshot;
use crate::error::{FetchError, Result};

/// Persistence for the mirror catalog snapshot.
///
/// At most one snapshot exists per store. Reads and writes are expected to be
/// cheap and synchronous.
pub trait CacheStore {
    /// Load the snapshot. `Ok(None)` means there is nothing stored.
    fn read(&self) -> Result<Option<MirrorCatalogSnapshot>>;

    /// Replace the stored snapshot.
    fn write(&self, snapshot: &MirrorCatalogSnapshot) -> Result<()>;

    /// Remove the stored snapshot. Returns whether anything was removed.
    fn clear(&self) -> Result<bool>;

    /// Where the snapshot lives, for display.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Snapshot stored as pretty-printed JSON in a single file.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written cache.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize a value for writing. Failures count against persisting, not parsing.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(value).map_err(|e| self.persist_error(e.into()))
    }

    fn persist_error(&self, source: std::io::Error) -> FetchError {
        FetchError::CachePersist {
            path: self.path.clone(),
            source,
        }
    }
}

impl CacheStore for JsonFileStore {
    fn read(&self) -> Result<Option<MirrorCatalogSnapshot>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FetchError::io(&self.path, e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| FetchError::parse("mirror cache", e))
    }

    fn write(&self, snapshot: &MirrorCatalogSnapshot) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| self.persist_error(e))?;

        let json = self.encode(snapshot)?;

        let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| self.persist_error(e))?;
        temp.write_all(&json).map_err(|e| self.persist_error(e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| self.persist_error(e))?;
        temp.persist(&self.path)
            .map_err(|e| self.persist_error(e.error))?;

        debug!(path = %self.path.display(), records = snapshot.records.len(), "mirror cache written");
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FetchError::io(&self.path, e)),
        }
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
