//! Catalog error types.
//!
//! These errors only travel between the internal stages of the pipeline.
//! `CatalogPipeline::fetch_category` matches every one of them and degrades
//! to the fallback dataset, so none reaches the caller.

use thiserror::Error;

/// Result type for catalog pipeline stages.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Missing credential: no Gemini API key configured")]
    MissingCredential,

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No valid candidates for category '{category}'")]
    NoValidCandidates { category: String },
}

impl CatalogError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportFailure(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn no_valid_candidates(category: impl Into<String>) -> Self {
        Self::NoValidCandidates {
            category: category.into(),
        }
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::MissingCredential => "missing_credential",
            CatalogError::TransportFailure(_) => "transport_failure",
            CatalogError::MalformedResponse(_) => "malformed_response",
            CatalogError::NoValidCandidates { .. } => "no_valid_candidates",
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(CatalogError::MissingCredential.kind(), "missing_credential");
        assert_eq!(CatalogError::transport("timeout").kind(), "transport_failure");
        assert_eq!(CatalogError::malformed("no json").kind(), "malformed_response");
        assert_eq!(
            CatalogError::no_valid_candidates("Pop").kind(),
            "no_valid_candidates"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CatalogError::transport("connection refused").to_string(),
            "Transport failure: connection refused"
        );
        assert_eq!(
            CatalogError::no_valid_candidates("K-Pop World Stage").to_string(),
            "No valid candidates for category 'K-Pop World Stage'"
        );
    }
}
