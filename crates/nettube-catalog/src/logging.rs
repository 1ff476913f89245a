//! Structured fetch logging.
//!
//! Every category fetch logs through a [`FetchLogger`] so the category and
//! operation are attached to each event as fields.

use tracing::{debug, info, warn, Span};

use crate::error::CatalogError;

/// Logger for one category fetch.
#[derive(Debug, Clone)]
pub struct FetchLogger {
    category: String,
    operation: String,
}

impl FetchLogger {
    /// Create a logger for a category and operation (e.g. "fetch_category").
    pub fn new(category: &str, operation: &str) -> Self {
        Self {
            category: category.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            category = %self.category,
            operation = %self.operation,
            "Fetch started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        debug!(
            category = %self.category,
            operation = %self.operation,
            "Fetch progress: {}", message
        );
    }

    /// Log a recovered failure that routes the fetch to the fallback dataset.
    pub fn log_fallback(&self, error: &CatalogError) {
        warn!(
            category = %self.category,
            operation = %self.operation,
            error_kind = error.kind(),
            "Using fallback dataset: {}", error
        );
    }

    pub fn log_completion(&self, source: &str, count: usize) {
        info!(
            category = %self.category,
            operation = %self.operation,
            source = source,
            count = count,
            "Fetch completed: {} entries from {}", count, source
        );
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Create a tracing span for this fetch.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "catalog_fetch",
            category = %self.category,
            operation = %self.operation
        )
    }
}
