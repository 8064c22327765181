//! URL-bearing attributes of blog posts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::assets::{AssetResolver, EmbeddableUrl, is_streamable_file_url, resolve_embeddable_url};

/// `media_type` value marking a post as a video post.
pub const VIDEO_MEDIA_TYPE: &str = "video";

/// The stored media references of a blog post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BlogMedia {
    /// Thumbnail asset reference.
    #[schema(example = "thumbnails/example.jpg")]
    pub thumbnail: Option<String>,
    /// `article` or `video`.
    #[schema(example = "video")]
    pub media_type: Option<String>,
    /// Uploaded video asset reference.
    pub video_path: Option<String>,
    /// Externally hosted video (direct file or video host page).
    #[schema(example = "https://www.youtube.com/watch?v=abc123")]
    pub external_video_url: Option<String>,
    /// Open Graph image asset reference.
    pub og_image: Option<String>,
}

/// Resolved public URLs for a blog post's media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BlogMediaUrls {
    pub thumbnail_url: Option<String>,
    pub video_stream_url: Option<String>,
    pub video_embed_url: Option<String>,
    pub og_image_url: Option<String>,
    pub is_video: bool,
}

impl BlogMedia {
    pub fn is_video(&self) -> bool {
        self.media_type.as_deref() == Some(VIDEO_MEDIA_TYPE)
    }

    pub async fn thumbnail_url(&self, resolver: &AssetResolver) -> Option<String> {
        resolver.resolve(self.thumbnail.as_deref(), None).await
    }

    /// URL a `<video>` element can play.
    ///
    /// An external URL takes precedence over an uploaded file, but only
    /// counts when it points at a streamable file.
    pub async fn video_stream_url(&self, resolver: &AssetResolver) -> Option<String> {
        match self.external_url() {
            Some(url) => is_streamable_file_url(url).then(|| url.to_string()),
            None => resolver.resolve(self.video_path.as_deref(), None).await,
        }
    }

    /// Player URL for an externally hosted, non-streamable video.
    pub fn video_embed_url(&self) -> Option<String> {
        match resolve_embeddable_url(self.external_url()?) {
            EmbeddableUrl::Embed(url) => Some(url),
            EmbeddableUrl::Stream(_) => None,
        }
    }

    /// Open Graph image, falling back to the thumbnail.
    pub async fn og_image_url(&self, resolver: &AssetResolver) -> Option<String> {
        let thumbnail = self.thumbnail_url(resolver).await;
        self.og_image_url_or(resolver, thumbnail.as_deref()).await
    }

    /// Resolve every media URL at once.
    pub async fn urls(&self, resolver: &AssetResolver) -> BlogMediaUrls {
        let thumbnail_url = self.thumbnail_url(resolver).await;
        let og_image_url = self
            .og_image_url_or(resolver, thumbnail_url.as_deref())
            .await;

        BlogMediaUrls {
            video_stream_url: self.video_stream_url(resolver).await,
            video_embed_url: self.video_embed_url(),
            is_video: self.is_video(),
            thumbnail_url,
            og_image_url,
        }
    }

    async fn og_image_url_or(
        &self,
        resolver: &AssetResolver,
        fallback: Option<&str>,
    ) -> Option<String> {
        resolver.resolve(self.og_image.as_deref(), fallback).await
    }

    fn external_url(&self) -> Option<&str> {
        self.external_video_url.as_deref().filter(|u| !u.is_empty())
    }
}
