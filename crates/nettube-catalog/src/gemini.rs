//! Gemini client for catalog discovery.
//!
//! This module provides the [`GenerativeModel`] seam the pipeline depends on,
//! and [`GeminiClient`], its implementation over Google's `generateContent`
//! REST endpoint with optional Google Search grounding.

use async_trait::async_trait;
use nettube_models::GroundingCitation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

/// One model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub prompt: String,
    /// Enable web-search augmentation so answers can cite real pages
    pub web_search: bool,
}

/// Text answer plus any web-search citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: String,
    pub citations: Vec<GroundingCitation>,
}

/// A hosted generative model the pipeline can query.
///
/// Implementations are created once per process and shared by reference.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Identifier for logs.
    fn name(&self) -> &str;

    async fn generate(&self, request: &ModelRequest) -> CatalogResult<ModelResponse>;
}

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    model: String,
    api_base: String,
    client: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleSearch")]
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(rename = "groundingMetadata", default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl GeminiResponse {
    /// Collapse the first candidate into text and citations.
    fn into_model_response(self) -> ModelResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return ModelResponse::default();
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        let citations = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| {
                let web = chunk.web?;
                let uri = web.uri.filter(|u| !u.trim().is_empty())?;
                Some(GroundingCitation::new(uri, web.title.unwrap_or_default()))
            })
            .collect();

        ModelResponse { text, citations }
    }
}

impl GeminiClient {
    /// Create a client from catalog configuration.
    ///
    /// Fails with [`CatalogError::MissingCredential`] when no key is set.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(CatalogError::MissingCredential)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CatalogError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// Call Gemini API.
    async fn call_gemini_api(&self, request: &ModelRequest) -> CatalogResult<ModelResponse> {
        let body = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            tools: if request.web_search {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            } else {
                Vec::new()
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::transport(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            CatalogError::transport(format!("Failed to decode Gemini response: {}", e))
        })?;

        Ok(gemini_response.into_model_response())
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &ModelRequest) -> CatalogResult<ModelResponse> {
        info!(model = %self.model, web_search = request.web_search, "Calling Gemini API");
        let response = self.call_gemini_api(request).await?;
        debug!(
            model = %self.model,
            text_len = response.text.len(),
            citations = response.citations.len(),
            "Gemini API responded"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_google_search_tool() {
        let body = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["tools"][0], json!({ "googleSearch": {} }));
    }

    #[test]
    fn test_request_omits_tools_without_web_search() {
        let body = GeminiRequest {
            contents: vec![],
            tools: vec![],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_response_joins_parts_and_collects_citations() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "first" }, { "thought": true }, { "text": "second" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://www.youtube.com/watch?v=dQw4w9WgXcQ", "title": "youtube.com" } },
                        { "web": { "uri": "" } },
                        { "retrievedContext": {} }
                    ]
                }
            }]
        });

        let response: GeminiResponse = serde_json::from_value(raw).unwrap();
        let response = response.into_model_response();

        assert_eq!(response.text, "first\nsecond");
        assert_eq!(
            response.citations,
            vec![GroundingCitation::new(
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "youtube.com"
            )]
        );
    }

    #[test]
    fn test_empty_response_is_empty() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.into_model_response(), ModelResponse::default());
    }

    #[test]
    fn test_from_config_requires_credential() {
        let result = GeminiClient::from_config(&CatalogConfig::default());
        assert!(matches!(result, Err(CatalogError::MissingCredential)));

        let client = GeminiClient::from_config(&CatalogConfig::default().with_api_key("k")).unwrap();
        assert_eq!(client.name(), crate::config::DEFAULT_MODEL);
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_trailing_slash_in_api_base_is_dropped() {
        let config = CatalogConfig {
            api_base: "http://127.0.0.1:9999/".to_string(),
            ..CatalogConfig::default().with_api_key("k")
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let config = CatalogConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            ..CatalogConfig::default().with_api_key("k")
        };
        let client = GeminiClient::from_config(&config).unwrap();

        let err = client
            .generate(&ModelRequest {
                prompt: "Find videos".to_string(),
                web_search: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport_failure");
    }
}
