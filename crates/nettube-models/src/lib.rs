//! Shared data models for the NetTube catalog.
//!
//! This crate provides Serde-serializable types for:
//! - Catalog entries and category rows
//! - Source platform classification and playback modes
//! - Loosely-typed model candidates prior to normalization
//! - The video URL classifier/resolver

pub mod candidate;
pub mod classifier;
pub mod entry;
pub mod source;
pub mod utils;

// Re-export common types
pub use candidate::RawCandidate;
pub use classifier::{classify, extract_youtube_id, Classification, UrlClassifier, DEFAULT_ORIGIN};
pub use entry::{CatalogEntry, CategoryResult, GroundingCitation};
pub use source::{ParseSourceTypeError, PlaybackMode, SourceType};
pub use utils::{clean_url, extract_host, is_video_platform_host};
