use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use ::common::storage::StorageDisk;
use ::common::storage::filesystem::LocalDisk;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tempfile::TempDir;

use media_server::config::{
    AppConfig, ApplicationConfig, CorsConfig, DiskConfig, MarketingConfig, SeoConfig,
    ServerConfig, StorageConfig,
};
use media_server::state::AppState;

/// Base URL every resolved URL in tests is built from.
pub const BASE_URL: &str = "https://levelminds.test";

pub mod routes {
    pub const MEDIA_URLS: &str = "/api/v1/media/urls";
    pub const SEO: &str = "/api/v1/seo";
    pub const HEALTH: &str = "/health";

    pub fn storage(path: &str) -> String {
        format!("/storage/{path}")
    }

    pub fn marketing(path: &str) -> String {
        format!("/api/v1/marketing/{path}")
    }
}

/// Knobs for [`TestApp::spawn_with`].
#[derive(Default)]
pub struct TestOptions {
    /// Disk to serve from instead of a local disk in a temp directory.
    pub disk: Option<Arc<dyn StorageDisk>>,
    pub marketing_asset_base_url: String,
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub disk: Arc<dyn StorageDisk>,
    /// Holds the public root, the storage root and the SEO settings file.
    pub dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let bytes = res
            .bytes()
            .await
            .expect("Failed to read response body")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            bytes,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(TestOptions::default()).await
    }

    pub async fn spawn_with(options: TestOptions) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let public_root = dir.path().join("public");
        let storage_root = dir.path().join("storage/app/public");
        std::fs::create_dir_all(&public_root).expect("Failed to create public root");

        let disk = match options.disk {
            Some(disk) => disk,
            None => Arc::new(
                LocalDisk::new(storage_root.clone(), None)
                    .await
                    .expect("Failed to create local disk"),
            ),
        };

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            app: ApplicationConfig {
                name: "LevelMinds".to_string(),
                base_url: BASE_URL.to_string(),
            },
            storage: StorageConfig {
                public_root,
                disk: DiskConfig {
                    driver: disk.driver(),
                    root: storage_root,
                    url: None,
                    bucket: None,
                    region: None,
                    endpoint: None,
                    access_key: None,
                    secret_key: None,
                    path_style: false,
                },
            },
            marketing: MarketingConfig {
                asset_base_url: options.marketing_asset_base_url,
            },
            seo: SeoConfig {
                settings_path: dir.path().join("storage/app/seo.json"),
            },
        };

        let state = AppState::new(app_config, Arc::clone(&disk)).expect("Invalid base URL");
        let app = media_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            disk,
            dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn public_root(&self) -> PathBuf {
        self.dir.path().join("public")
    }

    /// Put a file on the storage disk.
    pub async fn store(&self, path: &str, data: &[u8]) {
        self.disk
            .put(path, data)
            .await
            .expect("Failed to write storage file");
    }

    /// Put a file under the public root.
    pub fn publish(&self, relative: &str, data: &[u8]) {
        let full = self.public_root().join(relative);
        std::fs::create_dir_all(full.parent().unwrap()).expect("Failed to create public dir");
        std::fs::write(full, data).expect("Failed to write public file");
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }
}
