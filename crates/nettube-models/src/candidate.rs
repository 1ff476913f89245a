//! Loosely-typed catalog candidates.
//!
//! Model output is only "roughly" JSON-shaped: keys drift between camelCase
//! and snake_case, years come back as numbers, and entries may be missing
//! fields entirely. [`RawCandidate`] absorbs all of that so normalization can
//! work on plain optional strings.

use serde_json::Value;

/// A candidate record before validation and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCandidate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    /// Platform hint reported by the model; informational only
    pub platform: Option<String>,
}

const VIDEO_URL_KEYS: &[&str] = &["videoUrl", "video_url", "url", "link"];
const THUMBNAIL_KEYS: &[&str] = &["thumbnail", "thumbnail_url", "thumbnailUrl", "poster"];

impl RawCandidate {
    /// Candidate with only a URL and title; used for fallback seeds.
    pub fn new(title: impl Into<String>, video_url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            video_url: Some(video_url.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(
        mut self,
        year: impl Into<String>,
        rating: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        self.year = Some(year.into());
        self.rating = Some(rating.into());
        self.duration = Some(duration.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Build a candidate from an arbitrary JSON value.
    ///
    /// Returns `None` for non-object values. Scalars are stringified and
    /// blank strings are treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |keys: &[&str]| keys.iter().find_map(|k| object.get(*k).and_then(scalar_string));

        Some(Self {
            title: field(&["title", "name"]),
            description: field(&["description", "summary"]),
            video_url: field(VIDEO_URL_KEYS),
            thumbnail: field(THUMBNAIL_KEYS),
            year: field(&["year", "releaseYear", "release_year"]),
            rating: field(&["rating"]),
            duration: field(&["duration", "runtime"]),
            platform: field(&["platform", "sourceType", "source_type"]),
        })
    }

    /// The URL, if present and non-blank.
    pub fn url(&self) -> Option<&str> {
        self.video_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
