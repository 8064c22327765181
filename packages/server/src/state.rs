use std::sync::Arc;

use common::assets::{AssetResolver, BaseUrl, MarketingAssets, PublicRoot};
use common::seo::{JsonFileSettingsStore, SeoSettingsCache, SettingsStore};
use common::storage::StorageDisk;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub disk: Arc<dyn StorageDisk>,
    pub resolver: Arc<AssetResolver>,
    pub marketing: Arc<MarketingAssets>,
    pub seo_store: Arc<dyn SettingsStore>,
    pub seo_cache: Arc<SeoSettingsCache>,
}

impl AppState {
    /// Wire the shared services around an already opened disk.
    pub fn new(config: AppConfig, disk: Arc<dyn StorageDisk>) -> Result<Self, url::ParseError> {
        let base_url = BaseUrl::parse(&config.app.base_url)?;
        let public = PublicRoot::new(config.storage.public_root.clone());

        let resolver = AssetResolver::new(public.clone(), base_url.clone(), Arc::clone(&disk));
        let marketing =
            MarketingAssets::new(public, base_url, &config.marketing.asset_base_url);
        let seo_store = JsonFileSettingsStore::new(config.seo.settings_path.clone());

        Ok(Self {
            resolver: Arc::new(resolver),
            marketing: Arc::new(marketing),
            seo_store: Arc::new(seo_store),
            seo_cache: Arc::new(SeoSettingsCache::new()),
            disk,
            config,
        })
    }
}
