//! Catalog fetch pipeline for NetTube.
//!
//! This crate queries a generative model (Gemini with Google Search
//! grounding) for each category row, extracts candidates from its loosely
//! structured answer, normalizes them into playable [`CatalogEntry`] values
//! and degrades to a curated fallback dataset on any failure.
//!
//! [`CatalogEntry`]: nettube_models::CatalogEntry

pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod gemini;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod prompt;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use fallback::{seeds_for, DEFAULT_FALLBACK_CATEGORY};
pub use gemini::{GeminiClient, GenerativeModel, ModelRequest, ModelResponse};
pub use logging::FetchLogger;
pub use normalize::{clean_title, Normalizer, PlatformPolicy};
pub use pipeline::{Catalog, CatalogPipeline, DEFAULT_CATEGORIES};
