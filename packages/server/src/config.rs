use std::path::PathBuf;

use common::storage::DiskDriver;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationConfig {
    /// Site name used when SEO settings are first created.
    pub name: String,
    /// Absolute URL every public URL is built from.
    pub base_url: String,
}

/// The storage disk uploads live on.
#[derive(Debug, Deserialize, Clone)]
pub struct DiskConfig {
    pub driver: DiskDriver,
    /// Root directory for the `local` driver.
    pub root: PathBuf,
    /// Public base URL the disk advertises. Optional for both drivers.
    pub url: Option<String>,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    #[serde(default)]
    pub path_style: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory the web server serves directly.
    pub public_root: PathBuf,
    pub disk: DiskConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MarketingConfig {
    /// Host for marketing images that are not bundled. Empty keeps them local.
    #[serde(default)]
    pub asset_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeoConfig {
    pub settings_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub app: ApplicationConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub marketing: MarketingConfig,
    pub seo: SeoConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("app.name", "LevelMinds")?
            .set_default("app.base_url", "http://localhost:8000")?
            .set_default("storage.public_root", "./public")?
            .set_default("storage.disk.driver", "local")?
            .set_default("storage.disk.root", "./storage/app/public")?
            .set_default("seo.settings_path", "./storage/app/seo.json")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., MEDIA__APP__BASE_URL)
            .add_source(Environment::with_prefix("MEDIA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
