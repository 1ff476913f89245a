//! Prompt construction for catalog queries.

/// Build the instruction sent to the model for one category.
///
/// The model is asked for full-length, embeddable titles from verified
/// channels and a fenced JSON array with fixed field names, which is what
/// [`crate::extract::extract_json_candidates`] looks for.
pub fn build_catalog_prompt(category: &str, limit: usize) -> String {
    format!(
        r#"Find {limit} full-length, free-to-watch videos for the streaming category "{category}".

STRICT REQUIREMENTS:
1. FULL-LENGTH ONLY: complete features, full episodes, official music videos or full live sessions. No excerpts, compilations or fan uploads.
2. EMBEDDABLE ONLY: the video must allow playback inside third-party sites.
3. NO PAID LISTINGS: skip rental or purchase pages such as "YouTube Movies & TV".
4. VERIFIED SOURCES: prefer official studio, label, artist or network channels and named verified distributors.
5. ACCEPTABLE HOSTS: youtube.com, youtu.be, vimeo.com, dailymotion.com, or a direct .mp4/.webm/.m3u8 file.

Return ONLY a JSON array inside a ```json code block, with objects of this exact shape:
[
  {{
    "title": "Exact title",
    "description": "One or two sentences about it",
    "videoUrl": "https://www.youtube.com/watch?v=VIDEO_ID",
    "thumbnail": "https://img.youtube.com/vi/VIDEO_ID/maxresdefault.jpg",
    "year": "2024",
    "rating": "PG-13",
    "duration": "2h 10m",
    "platform": "youtube"
  }}
]"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_category_and_limit() {
        let prompt = build_catalog_prompt("K-Pop World Stage", 8);
        assert!(prompt.contains("Find 8 full-length"));
        assert!(prompt.contains("\"K-Pop World Stage\""));
    }

    #[test]
    fn test_prompt_requests_fenced_json_with_fixed_fields() {
        let prompt = build_catalog_prompt("Pop Chart Toppers", 10);
        assert!(prompt.contains("```json"));
        for field in [
            "\"title\"",
            "\"description\"",
            "\"videoUrl\"",
            "\"thumbnail\"",
            "\"year\"",
            "\"rating\"",
            "\"duration\"",
        ] {
            assert!(prompt.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_prompt_states_quality_constraints() {
        let prompt = build_catalog_prompt("Trending English Movies", 10);
        assert!(prompt.contains("FULL-LENGTH ONLY"));
        assert!(prompt.contains("EMBEDDABLE ONLY"));
        assert!(prompt.contains("YouTube Movies & TV"));
        assert!(prompt.contains("verified"));
    }
}
