//! Candidate normalization and filtering.
//!
//! Turns loosely-typed [`RawCandidate`]s into [`CatalogEntry`] values:
//! rejects unusable candidates, classifies the URL, fills defaults and
//! cleans the title. Input order is preserved.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use nettube_models::{clean_url, CatalogEntry, RawCandidate, SourceType, UrlClassifier};
use regex::Regex;
use tracing::debug;

use crate::config::CatalogConfig;

/// Case-insensitive substrings marking non-feature content.
pub const BLOCKED_KEYWORDS: &[&str] = &[
    "trailer",
    "teaser",
    "clip",
    "review",
    "reaction",
    "preview",
    "how to",
    "bts",
    "making of",
    "scene",
];

pub const DEFAULT_TITLE: &str = "Untitled Cinematic";
pub const DEFAULT_DESCRIPTION: &str = "A highly rated title curated specifically for your profile.";
pub const DEFAULT_YEAR: &str = "2024";
pub const DEFAULT_RATING: &str = "PG-13";
pub const DEFAULT_DURATION: &str = "2h";

/// Site-name suffixes search results append to page titles.
///
/// `| YouTube` style suffixes need no entry: `clean_title` keeps only the
/// text before the first ` | `.
const TITLE_SUFFIXES: &[&str] = &[" - YouTube", " - Vimeo", " - Dailymotion"];

static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)").unwrap());

/// Whether the platform allow-list applies to a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformPolicy {
    /// Reject sources outside the allow-list (live results)
    Enforce,
    /// Accept every source (curated fallback seeds)
    Bypass,
}

/// Why a candidate was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    MissingUrl,
    BlockedKeyword(&'static str),
    PlatformNotAllowed(SourceType),
    Duplicate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingUrl => write!(f, "missing URL"),
            Rejection::BlockedKeyword(k) => write!(f, "blocked keyword '{}'", k),
            Rejection::PlatformNotAllowed(s) => write!(f, "platform '{}' not allowed", s),
            Rejection::Duplicate => write!(f, "duplicate embed URL"),
        }
    }
}

/// Normalizes candidates for one embedding origin and platform policy.
#[derive(Debug, Clone)]
pub struct Normalizer {
    classifier: UrlClassifier,
    allowed_platforms: HashSet<SourceType>,
}

impl Normalizer {
    pub fn new(classifier: UrlClassifier, allowed_platforms: HashSet<SourceType>) -> Self {
        Self {
            classifier,
            allowed_platforms,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            UrlClassifier::new(config.origin.clone()),
            config.allowed_platforms.clone(),
        )
    }

    pub fn allows(&self, source_type: SourceType) -> bool {
        self.allowed_platforms.contains(&source_type)
    }

    /// Normalize a batch of candidates for `category`.
    ///
    /// Rejected candidates are dropped (logged at debug); the result may be
    /// empty.
    pub fn normalize(
        &self,
        candidates: &[RawCandidate],
        category: &str,
        policy: PlatformPolicy,
    ) -> Vec<CatalogEntry> {
        let mut seen_urls = HashSet::new();
        let mut entries = Vec::with_capacity(candidates.len());

        for (index, candidate) in candidates.iter().enumerate() {
            match self.normalize_one(candidate, index, category, policy, &mut seen_urls) {
                Ok(entry) => entries.push(entry),
                Err(reason) => debug!(
                    category = %category,
                    index,
                    title = candidate.title.as_deref().unwrap_or_default(),
                    reason = %reason,
                    "Rejected candidate"
                ),
            }
        }

        entries
    }

    fn normalize_one(
        &self,
        candidate: &RawCandidate,
        index: usize,
        category: &str,
        policy: PlatformPolicy,
        seen_urls: &mut HashSet<String>,
    ) -> Result<CatalogEntry, Rejection> {
        let url = candidate
            .url()
            .map(clean_url)
            .filter(|u| !u.is_empty())
            .ok_or(Rejection::MissingUrl)?;

        let raw_title = candidate
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);
        if let Some(keyword) = blocked_keyword(raw_title) {
            return Err(Rejection::BlockedKeyword(keyword));
        }

        let classification = self.classifier.classify(url);
        if policy == PlatformPolicy::Enforce && !self.allows(classification.source_type) {
            return Err(Rejection::PlatformNotAllowed(classification.source_type));
        }

        if !seen_urls.insert(classification.embed_url.clone()) {
            return Err(Rejection::Duplicate);
        }

        let id = classification
            .canonical_id
            .clone()
            .unwrap_or_else(|| placeholder_id(index, category));

        let thumbnail = candidate
            .thumbnail
            .clone()
            .or_else(|| classification.thumbnail_url())
            .unwrap_or_else(|| format!("https://picsum.photos/seed/{}/800/450", id));

        Ok(CatalogEntry {
            title: clean_title(raw_title),
            description: candidate
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            thumbnail,
            video_url: classification.embed_url,
            source_type: classification.source_type,
            year: Some(or_default(&candidate.year, DEFAULT_YEAR)),
            rating: Some(or_default(&candidate.rating, DEFAULT_RATING)),
            duration: Some(or_default(&candidate.duration, DEFAULT_DURATION)),
            category: category.to_string(),
            id,
        })
    }
}

/// First blocked keyword found in `title`, if any.
pub fn blocked_keyword(title: &str) -> Option<&'static str> {
    let lower = title.to_lowercase();
    BLOCKED_KEYWORDS.iter().copied().find(|k| lower.contains(k))
}

/// Strip site-name suffixes, `|` sections and bracketed annotations.
///
/// Falls back to the trimmed input when nothing would be left.
pub fn clean_title(title: &str) -> String {
    let original = title.trim();

    let mut cleaned = original;
    for suffix in TITLE_SUFFIXES {
        cleaned = strip_suffix_ignore_case(cleaned, suffix);
    }
    let cleaned = cleaned.split(" | ").next().unwrap_or_default();
    let cleaned = ANNOTATION_RE.replace_all(cleaned, " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.is_empty() {
        original.to_string()
    } else {
        cleaned
    }
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> &'a str {
    let Some(split) = s.len().checked_sub(suffix.len()) else {
        return s;
    };
    match s.get(split..) {
        Some(tail) if tail.eq_ignore_ascii_case(suffix) => s[..split].trim_end(),
        _ => s,
    }
}

fn placeholder_id(index: usize, category: &str) -> String {
    let compact: String = category.chars().filter(|c| !c.is_whitespace()).collect();
    format!("ext-{}-{}", index, compact)
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}
