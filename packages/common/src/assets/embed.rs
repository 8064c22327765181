//! Externally hosted video URLs.
//!
//! A video may be stored as an external URL instead of an uploaded file. Such
//! a URL either points straight at a playable file, which players stream
//! directly, or at a video host page, which is rewritten into the host's
//! embeddable player URL.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

/// File extensions a `<video>` element can play directly.
pub const STREAMABLE_EXTENSIONS: &[&str] = &[
    ".mp4", ".webm", ".ogg", ".ogv", ".mov", ".m4v", ".m3u8",
];

static YOUTUBE_WATCH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(youtu\.be/|v=)([^&]+)").expect("watch id regex should compile"));
static YOUTUBE_EMBED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"embed/([^?]+)").expect("embed id regex should compile"));
static VIMEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vimeo\.com/(\d+)").expect("vimeo id regex should compile"));

/// How an external video URL should be played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum EmbeddableUrl {
    /// A direct file URL for a `<video>` element.
    Stream(String),
    /// A player URL for an `<iframe>`.
    Embed(String),
}

impl EmbeddableUrl {
    pub fn stream_url(&self) -> Option<&str> {
        match self {
            Self::Stream(url) => Some(url),
            Self::Embed(_) => None,
        }
    }

    pub fn embed_url(&self) -> Option<&str> {
        match self {
            Self::Embed(url) => Some(url),
            Self::Stream(_) => None,
        }
    }
}

/// Whether `url` is an absolute URL whose path ends in a streamable extension.
///
/// Query strings and fragments are ignored; the comparison is
/// case-insensitive.
pub fn is_streamable_file_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !parsed.has_host() {
        return false;
    }

    let path = parsed.path().to_ascii_lowercase();
    if path.is_empty() {
        return false;
    }

    STREAMABLE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Classify an external video URL as a direct stream or an embed.
///
/// YouTube and Vimeo page URLs are rewritten into their canonical player
/// form; anything unrecognised is embedded unchanged.
pub fn resolve_embeddable_url(url: &str) -> EmbeddableUrl {
    if is_streamable_file_url(url) {
        return EmbeddableUrl::Stream(url.to_string());
    }

    EmbeddableUrl::Embed(embed_url_for(url).unwrap_or_else(|| url.to_string()))
}

fn embed_url_for(url: &str) -> Option<String> {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        let id = YOUTUBE_WATCH_ID
            .captures(url)
            .and_then(|c| c.get(2))
            .or_else(|| YOUTUBE_EMBED_ID.captures(url).and_then(|c| c.get(1)))?;
        return Some(format!("https://www.youtube.com/embed/{}", id.as_str()));
    }

    if url.contains("vimeo.com") {
        let id = VIMEO_ID.captures(url).and_then(|c| c.get(1))?;
        return Some(format!("https://player.vimeo.com/video/{}", id.as_str()));
    }

    None
}
