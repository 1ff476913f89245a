//! Catalog fetch pipeline.
//!
//! One fetch runs a chain of fallible stages (credential, query, extraction,
//! normalization). The first failure is matched once in
//! [`CatalogPipeline::fetch_category`] and routed to the fallback dataset,
//! so callers always receive a non-empty list.

use std::sync::Arc;

use futures::future::join_all;
use nettube_models::{CatalogEntry, CategoryResult};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::extract::extract_candidates;
use crate::fallback::seeds_for;
use crate::gemini::{GeminiClient, GenerativeModel, ModelRequest};
use crate::logging::FetchLogger;
use crate::normalize::{Normalizer, PlatformPolicy};
use crate::prompt::build_catalog_prompt;

/// Category rows shown on the home screen, in display order.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Global Trending Music Videos",
    "Pop Chart Toppers",
    "Hip Hop & Rap Essentials",
    "Electronic & Dance Anthems",
    "K-Pop World Stage",
    "Rock & Alternative Classics",
    "Acoustic & Unplugged Sessions",
    "R&B/Soul Melodies",
];

/// All rows of a catalog load plus the hero pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub rows: Vec<CategoryResult>,

    /// First entry of the first non-empty row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<CatalogEntry>,
}

impl Catalog {
    pub fn from_rows(rows: Vec<CategoryResult>) -> Self {
        let featured = rows
            .iter()
            .find_map(|row| row.entries.first())
            .cloned();
        Self { rows, featured }
    }
}

/// Turns category labels into playable catalog entries.
///
/// The model client is injected once at construction and shared read-only
/// by every fetch; `None` means no credential is configured.
#[derive(Clone)]
pub struct CatalogPipeline {
    model: Option<Arc<dyn GenerativeModel>>,
    normalizer: Normalizer,
    config: CatalogConfig,
}

impl CatalogPipeline {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>, config: CatalogConfig) -> Self {
        Self {
            model,
            normalizer: Normalizer::from_config(&config),
            config,
        }
    }

    /// Build a pipeline backed by Gemini when a credential is configured.
    pub fn from_config(config: CatalogConfig) -> Self {
        if !config.has_credential() {
            tracing::warn!("GEMINI_API_KEY not set; serving fallback catalog only");
            return Self::new(None, config);
        }

        let model = match GeminiClient::from_config(&config) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn GenerativeModel>),
            Err(e) => {
                tracing::warn!(error_kind = e.kind(), "Gemini client unavailable: {}", e);
                None
            }
        };
        Self::new(model, config)
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Fetch entries for one category.
    ///
    /// Never fails and never returns an empty list: any failure degrades to
    /// the category's fallback seeds, or the default category's.
    pub async fn fetch_category(&self, category: &str) -> Vec<CatalogEntry> {
        let logger = FetchLogger::new(category, "fetch_category");
        let span = logger.create_span();

        async {
            logger.log_start("querying model");
            match self.fetch_live(category, &logger).await {
                Ok(entries) => {
                    logger.log_completion("live", entries.len());
                    entries
                }
                Err(e) => {
                    logger.log_fallback(&e);
                    let entries = self.fallback_entries(category);
                    logger.log_completion("fallback", entries.len());
                    entries
                }
            }
        }
        .instrument(span)
        .await
    }

    /// [`fetch_category`](Self::fetch_category) tagged with its category.
    pub async fn fetch_category_result(&self, category: &str) -> CategoryResult {
        CategoryResult::new(category, self.fetch_category(category).await)
    }

    /// Fetch every category concurrently and wait for all of them.
    ///
    /// Rows keep the order of `categories`.
    pub async fn load_catalog<S: AsRef<str>>(&self, categories: &[S]) -> Catalog {
        let rows = join_all(
            categories
                .iter()
                .map(|category| self.fetch_category_result(category.as_ref())),
        )
        .await;

        Catalog::from_rows(rows)
    }

    /// Normalized fallback seeds for a category.
    pub fn fallback_entries(&self, category: &str) -> Vec<CatalogEntry> {
        self.normalizer
            .normalize(&seeds_for(category), category, PlatformPolicy::Bypass)
    }

    async fn fetch_live(
        &self,
        category: &str,
        logger: &FetchLogger,
    ) -> CatalogResult<Vec<CatalogEntry>> {
        let model = self.model.as_ref().ok_or(CatalogError::MissingCredential)?;

        let request = ModelRequest {
            prompt: build_catalog_prompt(category, self.config.result_limit),
            web_search: self.config.web_search,
        };
        let response = model.generate(&request).await?;
        logger.log_progress(&format!(
            "{} responded ({} chars, {} citations)",
            model.name(),
            response.text.len(),
            response.citations.len()
        ));

        let candidates = extract_candidates(&response)?;
        logger.log_progress(&format!("{} candidates extracted", candidates.len()));

        let entries = self
            .normalizer
            .normalize(&candidates, category, PlatformPolicy::Enforce);
        if entries.is_empty() {
            return Err(CatalogError::no_valid_candidates(category));
        }

        Ok(entries)
    }
}
