use common::seo::SeoSettings;
use serde::Serialize;

/// Current SEO settings with their asset references resolved.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SeoSettingsResponse {
    #[serde(flatten)]
    pub settings: SeoSettings,
    /// Public URL of `default_og_image`, if one is set.
    #[schema(example = "https://levelminds.example.com/storage/og/default.png")]
    pub default_og_image_url: Option<String>,
}
