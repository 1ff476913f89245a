//! Candidate extraction from model responses.
//!
//! Primary source is a JSON array in the response text; the grounding
//! citations are read only when that yields nothing.

use std::sync::LazyLock;

use nettube_models::{is_video_platform_host, GroundingCitation, RawCandidate, SourceType};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::gemini::ModelResponse;

/// Description given to candidates synthesized from citations.
pub const CITATION_DESCRIPTION: &str = "Experience this cinematic content from across the web.";

/// ```json ... ``` or a bare ``` ... ``` fence.
static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").unwrap());

/// Start of an array of objects; skips prose brackets such as `[1]`.
static ARRAY_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\s*\{").unwrap());

/// Extract candidates from the JSON embedded in the response text.
///
/// Looks for a fenced block first, then the first bare array of objects.
/// Only the first JSON value of a span is read, so prose after it is
/// ignored. An object wrapping an array (`{"movies": [...]}`) is unwrapped.
pub fn extract_json_candidates(text: &str) -> CatalogResult<Vec<RawCandidate>> {
    let spans: Vec<&str> = [fenced_block(text), bare_array(text)]
        .into_iter()
        .flatten()
        .collect();

    if spans.is_empty() {
        return Err(CatalogError::malformed("no JSON block in response text"));
    }

    let mut last_error = None;
    for span in spans {
        match first_json_value(span) {
            Ok(value) => return candidates_from_json(value),
            Err(e) => last_error = Some(e),
        }
    }

    Err(CatalogError::malformed(format!(
        "invalid JSON in response: {}",
        last_error.unwrap_or_default()
    )))
}

/// Synthesize candidates from grounding citations that point at a video
/// platform. Other citations (news sites, databases) are dropped.
pub fn candidates_from_citations(citations: &[GroundingCitation]) -> Vec<RawCandidate> {
    citations
        .iter()
        .filter(|c| is_video_platform_host(&c.uri))
        .map(|c| {
            RawCandidate {
                title: Some(c.title.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                video_url: Some(c.uri.clone()),
                ..Default::default()
            }
            .with_description(CITATION_DESCRIPTION)
            .with_platform(SourceType::Other.as_str())
        })
        .collect()
}

/// Run primary then secondary extraction.
///
/// Fails with [`CatalogError::MalformedResponse`] when neither source yields
/// a single candidate.
pub fn extract_candidates(response: &ModelResponse) -> CatalogResult<Vec<RawCandidate>> {
    match extract_json_candidates(&response.text) {
        Ok(candidates) if !candidates.is_empty() => return Ok(candidates),
        Ok(_) => debug!("Response JSON held no candidates, trying citations"),
        Err(e) => debug!(error = %e, "JSON extraction failed, trying citations"),
    }

    let candidates = candidates_from_citations(&response.citations);
    if candidates.is_empty() {
        return Err(CatalogError::malformed(format!(
            "no JSON candidates and no usable citations ({} citations)",
            response.citations.len()
        )));
    }

    debug!(count = candidates.len(), "Using grounding citations");
    Ok(candidates)
}

fn fenced_block(text: &str) -> Option<&str> {
    FENCED_BLOCK_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// Text from the first `[{` to the end; the parser stops after the array.
fn bare_array(text: &str) -> Option<&str> {
    ARRAY_START_RE.find(text).map(|m| &text[m.start()..])
}

/// Parse the first JSON value in `span`, ignoring anything after it.
fn first_json_value(span: &str) -> Result<Value, String> {
    match serde_json::Deserializer::from_str(span).into_iter::<Value>().next() {
        Some(result) => result.map_err(|e| e.to_string()),
        None => Err("empty JSON span".to_string()),
    }
}

fn candidates_from_json(value: Value) -> CatalogResult<Vec<RawCandidate>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| CatalogError::malformed("JSON object holds no array"))?,
        other => {
            return Err(CatalogError::malformed(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(items.iter().filter_map(RawCandidate::from_value).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
