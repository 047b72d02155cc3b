use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rmmp_fetch::{
    EventCallback, FallbackFetcher, JsonFileStore, MirrorCatalog, ReqwestClient,
};
use rmmp_platform::dir::RmmpDirs;

use crate::config::Config;

pub type Catalog = MirrorCatalog<ReqwestClient, JsonFileStore>;
pub type Fetcher = FallbackFetcher<ReqwestClient, JsonFileStore>;

/// Resolved locations and settings for one invocation.
#[derive(Debug, Clone)]
pub struct RmmpEnv {
    dirs: RmmpDirs,
    config: Config,
}

impl RmmpEnv {
    pub fn new() -> Result<Self> {
        let dirs = RmmpDirs::resolve();
        let config_file = dirs.config_file();
        let config = Config::load(&config_file)
            .with_context(|| format!("Failed to load configuration from {}", config_file.display()))?;

        Ok(Self { dirs, config })
    }

    pub fn from_parts(dirs: RmmpDirs, config: Config) -> Self {
        Self { dirs, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache_file(&self) -> PathBuf {
        self.config
            .cache_file
            .clone()
            .unwrap_or_else(|| self.dirs.proxy_cache_file())
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.config
            .downloads_dir
            .clone()
            .unwrap_or_else(|| self.dirs.downloads_dir())
    }

    pub fn client(&self) -> Result<Arc<ReqwestClient>> {
        let client = ReqwestClient::new().context("Failed to build HTTP client")?;
        Ok(Arc::new(client))
    }

    pub fn catalog(&self, client: Arc<ReqwestClient>) -> Catalog {
        MirrorCatalog::new(client, JsonFileStore::new(self.cache_file()))
            .with_directory_url(self.config.directory_url.clone())
            .with_ttl(self.config.cache_ttl())
    }

    pub fn fetcher(&self, client: Arc<ReqwestClient>, on_event: EventCallback) -> Fetcher {
        let catalog = self.catalog(client.clone());
        let options = self.config.fallback_options().on_event(on_event);
        FallbackFetcher::new(client, catalog, options)
    }
}
