use serde::Serialize;

/// Resolved public URL of a marketing image.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MarketingUrlResponse {
    #[schema(example = "https://levelminds.example.com/images/marketing/hero.png")]
    pub url: String,
}
