//! Well-known locations of rmmp state.

use std::env;
use std::path::{Path, PathBuf};

use crate::os::is_android;

/// Environment variable overriding the state root.
pub const ROOT_ENV: &str = "RMMP_ROOT";

/// State root when running on a device.
pub const ANDROID_ROOT: &str = "/data/adb/modules/rmmp";

/// State root relative to the home directory on other hosts.
const HOST_ROOT: &str = "data/adb/.rmm/CACHE";

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// Resolved directory layout.
///
/// ```
/// use rmmp_platform::dir::RmmpDirs;
/// use std::path::Path;
///
/// let dirs = RmmpDirs::from_parts(None, false, Some("/home/me".into()));
/// assert_eq!(dirs.root(), Path::new("/home/me/data/adb/.rmm/CACHE"));
/// assert_eq!(dirs.proxy_cache_file(), Path::new("/home/me/data/adb/.rmm/CACHE/github_proxy.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RmmpDirs {
    root: PathBuf,
    android: bool,
    cwd_fallback: bool,
}

impl RmmpDirs {
    /// Resolve from the environment and the current host.
    pub fn resolve() -> Self {
        Self::from_parts(
            env::var_os(ROOT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            is_android(),
            user_home(),
        )
    }

    /// Resolve from explicit inputs. An override always wins; without a home
    /// directory the current directory is used.
    pub fn from_parts(override_root: Option<PathBuf>, android: bool, home: Option<PathBuf>) -> Self {
        let mut cwd_fallback = false;
        let root = match (override_root, home) {
            (Some(root), _) => root,
            (None, _) if android => PathBuf::from(ANDROID_ROOT),
            (None, Some(home)) => home.join(HOST_ROOT),
            (None, None) => {
                cwd_fallback = true;
                PathBuf::from(".")
            }
        };
        Self {
            root,
            android,
            cwd_fallback,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `github_proxys.json` on devices and in the home-less fallback,
    /// `github_proxy.json` under a home directory.
    pub fn proxy_cache_file(&self) -> PathBuf {
        let name = if self.android || self.cwd_fallback {
            "github_proxys.json"
        } else {
            "github_proxy.json"
        };
        self.root.join(name)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join("downloads")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }
}
