//! Public URL resolution for stored media references.

pub mod embed;
pub mod marketing;
mod prefix;
mod public;
mod resolver;

pub use embed::{EmbeddableUrl, is_streamable_file_url, resolve_embeddable_url};
pub use marketing::MarketingAssets;
pub use prefix::{
    PUBLIC_PREFIXES, STORAGE_PREFIXES, is_absolute_url, normalize_reference, strip_prefixes,
};
pub use public::{BaseUrl, PublicRoot, STORAGE_ROUTE_PREFIX};
pub use resolver::AssetResolver;
