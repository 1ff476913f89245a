//! Video URL classification and embed URL synthesis.
//!
//! Given an arbitrary URL string (usually produced by a language model), this
//! module decides which platform it belongs to and derives the URL the player
//! should actually load.
//!
//! Resolvers run in a fixed priority order and the first match wins:
//! YouTube, Vimeo, Dailymotion, direct media file, then the generic fallback.
//!
//! # Guarantees
//! - Never panics and never errors; unrecognised input resolves to
//!   [`SourceType::Other`]
//! - Platform embed URLs are always synthesized from the extracted ID, never
//!   copied from the input
//! - Direct and generic URLs are passed through unchanged

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::source::{PlaybackMode, SourceType};
use crate::utils::media_extension;

/// Origin used when the caller does not provide one.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Privacy-enhanced YouTube embed host.
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube-nocookie.com/embed";

/// watch?v=ID, embed/ID, v/ID, shorts/ID, youtu.be/ID. The 11-character ID
/// must be followed by a non-ID character (query, quote, markdown paren,
/// punctuation) or the end of input.
static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:(?i:youtube(?:-nocookie)?\.com)/(?:[^"\s]*?[?&]v=|(?:embed|v|e|shorts)/)|(?i:youtu\.be)/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)"#,
    )
    .unwrap()
});

static VIMEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:vimeo\.com)/(?:video/)?(\d+)").unwrap());

static DAILYMOTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:dailymotion\.com)/video/([A-Za-z0-9]+)").unwrap());

/// Result of classifying a raw URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    pub source_type: SourceType,

    /// Platform-native video ID, when one was extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_id: Option<String>,

    /// URL the player should load
    pub embed_url: String,

    pub playback: PlaybackMode,
}

impl Classification {
    /// Platform-derived thumbnail URL, if the platform exposes a stable one.
    pub fn thumbnail_url(&self) -> Option<String> {
        let id = self.canonical_id.as_deref()?;
        match self.source_type {
            SourceType::Youtube => Some(format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id)),
            SourceType::Dailymotion => {
                Some(format!("https://www.dailymotion.com/thumbnail/video/{}", id))
            }
            _ => None,
        }
    }
}

/// Classifier bound to the embedding application's origin.
///
/// YouTube rejects some embeds (error 153) unless both `origin` and
/// `widget_referrer` name the page hosting the player, so the origin is part
/// of the classifier rather than a global.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    origin: String,
    encoded_origin: String,
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl UrlClassifier {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        let encoded_origin = urlencoding::encode(origin.trim_end_matches('/')).into_owned();
        Self {
            origin,
            encoded_origin,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Classify a raw URL and derive its embeddable form.
    pub fn classify(&self, raw_url: &str) -> Classification {
        resolve_youtube(raw_url, &self.encoded_origin)
            .or_else(|| resolve_vimeo(raw_url))
            .or_else(|| resolve_dailymotion(raw_url))
            .or_else(|| resolve_direct(raw_url))
            .unwrap_or_else(|| resolve_other(raw_url))
    }
}

/// Classify a raw URL for the given application origin.
pub fn classify(raw_url: &str, origin: &str) -> Classification {
    UrlClassifier::new(origin).classify(raw_url)
}

/// Extract the 11-character YouTube video ID from any supported URL form.
pub fn extract_youtube_id(raw_url: &str) -> Option<String> {
    YOUTUBE_RE
        .captures(raw_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn resolve_youtube(raw_url: &str, encoded_origin: &str) -> Option<Classification> {
    let id = extract_youtube_id(raw_url)?;
    let embed_url = format!(
        "{base}/{id}?autoplay=1&mute=0&rel=0&modestbranding=1&enablejsapi=1&fs=1&origin={origin}&widget_referrer={origin}",
        base = YOUTUBE_EMBED_BASE,
        id = id,
        origin = encoded_origin,
    );

    Some(Classification {
        source_type: SourceType::Youtube,
        canonical_id: Some(id),
        embed_url,
        playback: PlaybackMode::Iframe,
    })
}

fn resolve_vimeo(raw_url: &str) -> Option<Classification> {
    let id = VIMEO_RE.captures(raw_url)?.get(1)?.as_str().to_string();
    let embed_url = format!("https://player.vimeo.com/video/{}?autoplay=1", id);

    Some(Classification {
        source_type: SourceType::Vimeo,
        canonical_id: Some(id),
        embed_url,
        playback: PlaybackMode::Iframe,
    })
}

fn resolve_dailymotion(raw_url: &str) -> Option<Classification> {
    let id = DAILYMOTION_RE.captures(raw_url)?.get(1)?.as_str().to_string();
    let embed_url = format!(
        "https://www.dailymotion.com/embed/video/{}?autoplay=1&mute=0",
        id
    );

    Some(Classification {
        source_type: SourceType::Dailymotion,
        canonical_id: Some(id),
        embed_url,
        playback: PlaybackMode::Iframe,
    })
}

fn resolve_direct(raw_url: &str) -> Option<Classification> {
    let playback = match media_extension(raw_url)? {
        ".m3u8" => PlaybackMode::AdaptiveStream,
        _ => PlaybackMode::NativeVideo,
    };

    Some(Classification {
        source_type: SourceType::Direct,
        canonical_id: None,
        embed_url: raw_url.to_string(),
        playback,
    })
}

fn resolve_other(raw_url: &str) -> Classification {
    Classification {
        source_type: SourceType::Other,
        canonical_id: None,
        embed_url: raw_url.to_string(),
        playback: PlaybackMode::ExternalFrame,
    }
}
