//! Source platform and playback models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform a video URL was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Youtube,
    Vimeo,
    Dailymotion,
    /// Direct media file (.mp4, .webm, .ogg, .m3u8)
    Direct,
    /// Anything else; loaded in a generic frame with an external-link escape hatch
    #[default]
    Other,
}

impl SourceType {
    /// Every variant, in classification priority order.
    pub const ALL: [SourceType; 5] = [
        SourceType::Youtube,
        SourceType::Vimeo,
        SourceType::Dailymotion,
        SourceType::Direct,
        SourceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Youtube => "youtube",
            SourceType::Vimeo => "vimeo",
            SourceType::Dailymotion => "dailymotion",
            SourceType::Direct => "direct",
            SourceType::Other => "other",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string does not name a [`SourceType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceTypeError(pub String);

impl fmt::Display for ParseSourceTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown source type: '{}'", self.0)
    }
}

impl std::error::Error for ParseSourceTypeError {}

impl FromStr for SourceType {
    type Err = ParseSourceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(SourceType::Youtube),
            "vimeo" => Ok(SourceType::Vimeo),
            "dailymotion" => Ok(SourceType::Dailymotion),
            "direct" => Ok(SourceType::Direct),
            "other" => Ok(SourceType::Other),
            _ => Err(ParseSourceTypeError(s.to_string())),
        }
    }
}

/// How the consuming UI must mount a resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Platform player inside an iframe
    Iframe,
    /// Native `<video>` element
    NativeVideo,
    /// HLS playlist; needs an adaptive-streaming player
    AdaptiveStream,
    /// Generic frame; the UI must offer an "open externally" link and
    /// treat frame load errors as expected
    ExternalFrame,
}

impl PlaybackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackMode::Iframe => "iframe",
            PlaybackMode::NativeVideo => "native_video",
            PlaybackMode::AdaptiveStream => "adaptive_stream",
            PlaybackMode::ExternalFrame => "external_frame",
        }
    }

    /// Whether the UI must render an external-link fallback.
    pub fn needs_external_link(&self) -> bool {
        matches!(self, PlaybackMode::ExternalFrame)
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_round_trips_through_str() {
        for source in SourceType::ALL {
            assert_eq!(source.as_str().parse::<SourceType>().unwrap(), source);
        }
    }

    #[test]
    fn test_source_type_parse_is_lenient_on_case_and_whitespace() {
        assert_eq!(" YouTube ".parse::<SourceType>().unwrap(), SourceType::Youtube);
        assert_eq!("DIRECT".parse::<SourceType>().unwrap(), SourceType::Direct);
        assert!("twitch".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_source_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SourceType::Dailymotion).unwrap(),
            "\"dailymotion\""
        );
        assert_eq!(
            serde_json::to_string(&PlaybackMode::AdaptiveStream).unwrap(),
            "\"adaptive_stream\""
        );
    }

    #[test]
    fn test_playback_external_link() {
        assert!(PlaybackMode::ExternalFrame.needs_external_link());
        assert!(!PlaybackMode::Iframe.needs_external_link());
    }
}
