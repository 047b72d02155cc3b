use serde::Deserialize;

use crate::error::{FetchError, Result};

/// Parsed `update.json` of a module release.
///
/// Always fetched fresh; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseManifest {
    pub version: String,
    pub version_code: i64,
    /// Absolute URL of the module archive.
    pub payload_url: String,
    pub changelog: Option<String>,
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    changelog: Option<String>,
    #[serde(default)]
    version: String,
    #[serde(rename = "versionCode", default)]
    version_code: i64,
    #[serde(rename = "zipUrl", default)]
    zip_url: Option<String>,
}

impl ReleaseManifest {
    /// Parse a manifest body. A missing or empty `zipUrl` is a parse failure.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_slice(body).map_err(|e| FetchError::parse("release manifest", e))?;

        let payload_url = raw
            .zip_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| FetchError::parse("release manifest", "zipUrl is missing"))?;

        Ok(Self {
            version: raw.version,
            version_code: raw.version_code,
            payload_url,
            changelog: raw.changelog.filter(|c| !c.is_empty()),
        })
    }

    /// Local file name the archive is stored under.
    pub fn archive_file_name(&self) -> String {
        format!(
            "module_{}_{}.zip",
            self.version.replace('/', "_"),
            self.version_code
        )
    }
}
