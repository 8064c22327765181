//! Site-wide SEO defaults.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::assets::{AssetResolver, PUBLIC_PREFIXES, STORAGE_PREFIXES, strip_prefixes};

/// Cache key the current settings are stored under.
pub const SETTINGS_CACHE_KEY: &str = "seo.settings";

#[derive(Debug, Error)]
pub enum SeoError {
    #[error("settings IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Site-wide SEO settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeoSettings {
    pub site_name: String,
    pub title_suffix: Option<String>,
    pub default_description: Option<String>,
    pub default_keywords: Option<String>,
    /// Asset reference for the default Open Graph image.
    pub default_og_image: Option<String>,
    pub twitter_handle: Option<String>,
    pub facebook_app_id: Option<String>,
    pub index_site: bool,
}

impl SeoSettings {
    /// Settings created on first use.
    pub fn defaults(site_name: &str) -> Self {
        Self {
            site_name: site_name.to_string(),
            title_suffix: None,
            default_description: None,
            default_keywords: None,
            default_og_image: None,
            twitter_handle: None,
            facebook_app_id: None,
            index_site: true,
        }
    }

    /// Public URL of the default Open Graph image.
    pub async fn default_og_image_url(&self, resolver: &AssetResolver) -> Option<String> {
        let value = self
            .default_og_image
            .as_deref()
            .filter(|v| !v.is_empty())?;

        if value.starts_with("http") {
            return Some(value.to_string());
        }

        let path = value.trim_start_matches('/');

        let public_candidate = strip_prefixes(path, PUBLIC_PREFIXES);
        if !public_candidate.is_empty() && resolver.public_root().has_file(public_candidate).await
        {
            return Some(resolver.base_url().asset(public_candidate));
        }

        // Already addressed through the storage route.
        if path.starts_with("storage/") {
            return Some(resolver.base_url().asset(path));
        }

        let storage_path = strip_prefixes(path, STORAGE_PREFIXES);
        if storage_path.is_empty() {
            return None;
        }

        Some(resolver.public_disk_url(storage_path))
    }
}

/// Persistence for the settings row.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The stored settings, if any were ever created.
    async fn first(&self) -> Result<Option<SeoSettings>, SeoError>;

    /// Persist `settings` and return what was stored.
    async fn create(&self, settings: SeoSettings) -> Result<SeoSettings, SeoError>;
}

/// Settings kept as a single JSON document on disk.
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn first(&self) -> Result<Option<SeoSettings>, SeoError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, settings: SeoSettings) -> Result<SeoSettings, SeoError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension(format!("tmp-{}", uuid::Uuid::new_v4()));
        let json = serde_json::to_vec_pretty(&settings)?;
        if let Err(e) = fs::write(&temp_path, &json).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        info!(path = %self.path.display(), "stored SEO settings");
        Ok(settings)
    }
}

/// Read-through cache for the current settings.
///
/// Passed explicitly to whoever needs the settings; the write path calls
/// [`SeoSettingsCache::forget`] after changing them.
#[derive(Default)]
pub struct SeoSettingsCache {
    entries: DashMap<&'static str, Arc<SeoSettings>>,
}

impl SeoSettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached settings, loading them (or creating defaults) on a miss.
    pub async fn current(
        &self,
        store: &dyn SettingsStore,
        site_name: &str,
    ) -> Result<Arc<SeoSettings>, SeoError> {
        let cached = self
            .entries
            .get(SETTINGS_CACHE_KEY)
            .map(|entry| Arc::clone(entry.value()));
        if let Some(settings) = cached {
            return Ok(settings);
        }

        debug!("SEO settings cache miss");
        let settings = match store.first().await? {
            Some(settings) => settings,
            None => store.create(SeoSettings::defaults(site_name)).await?,
        };

        // Concurrent loaders converge on whichever value landed first.
        let entry = self
            .entries
            .entry(SETTINGS_CACHE_KEY)
            .or_insert_with(|| Arc::new(settings));
        Ok(Arc::clone(entry.value()))
    }

    /// Drop the cached settings so the next read reloads them.
    pub fn forget(&self) {
        self.entries.remove(SETTINGS_CACHE_KEY);
    }
}
