use super::public::{BaseUrl, PublicRoot};

/// Directory under the public root that holds bundled marketing images.
pub const MARKETING_DIR: &str = "images/marketing";

/// URLs for marketing images.
///
/// Bundled copies under the public root win; otherwise the image is expected
/// on the configured marketing asset host.
#[derive(Debug, Clone)]
pub struct MarketingAssets {
    public: PublicRoot,
    base_url: BaseUrl,
    asset_base_url: String,
}

impl MarketingAssets {
    pub fn new(public: PublicRoot, base_url: BaseUrl, asset_base_url: &str) -> Self {
        Self {
            public,
            base_url,
            asset_base_url: asset_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        let relative = format!("{MARKETING_DIR}/{path}");

        if self.public.has_file(&relative).await || self.asset_base_url.is_empty() {
            return self.base_url.asset(&relative);
        }

        format!("{}/{path}", self.asset_base_url)
    }
}
