//! Shared services behind the tool handlers.

use std::path::Path;
use std::sync::Arc;

use afflink_client::{
    FetchClient, FetchConfig, Fetcher, LifecycleController, LinkService, RedirectProbe, ShellCache, ShellConfig,
    ShortLinkResolver,
};
use afflink_core::{AppConfig, CacheDb, CacheStorage, Error, LinkConverter, Marketplace};

/// Services built once at startup and shared by every tool call.
pub struct AppState {
    pub links: LinkService,
    pub shell: Arc<ShellCache>,
    pub lifecycle: Arc<LifecycleController<ShellCache>>,
}

impl AppState {
    /// Build services backed by the SQLite cache at `config.db_path`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let storage = open_storage(&config.db_path).await?;
        Self::with_storage(config, storage)
    }

    /// Build services over an existing storage backend, using the live HTTP client.
    pub fn with_storage(config: &AppConfig, storage: Arc<dyn CacheStorage>) -> Result<Self, Error> {
        let client = Arc::new(FetchClient::new(FetchConfig::from_app_config(config))?);
        Self::with_backends(config, storage, client.clone(), client)
    }

    /// Wire every service from explicit backends.
    pub fn with_backends(
        config: &AppConfig, storage: Arc<dyn CacheStorage>, probe: Arc<dyn RedirectProbe>, fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, Error> {
        let marketplace = Marketplace::default();
        let resolver = ShortLinkResolver::new(probe, marketplace.clone());
        let converter = LinkConverter::new(marketplace, config.affiliate_tag.clone());
        let links = LinkService::new(resolver, converter);

        let shell = Arc::new(ShellCache::new(ShellConfig::from_app_config(config)?, storage, fetcher));
        let lifecycle = Arc::new(LifecycleController::new(shell.clone()));

        Ok(Self { links, shell, lifecycle })
    }
}

async fn open_storage(path: &Path) -> Result<Arc<dyn CacheStorage>, Error> {
    let db = CacheDb::open(path).await?;
    tracing::debug!("opened shell cache at {}", path.display());
    Ok(Arc::new(db))
}
