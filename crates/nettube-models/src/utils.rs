//! Utility functions for URL inspection.
//!
//! Shared by the classifier and by the catalog pipeline's citation filter.

use url::Url;

/// Hosts recognised as video platforms (subdomains included).
const VIDEO_PLATFORM_HOSTS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "youtube-nocookie.com",
    "vimeo.com",
    "dailymotion.com",
];

/// Extensions treated as direct media files.
pub(crate) const MEDIA_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".ogg", ".m3u8"];

/// Strip whitespace and quote characters the model tends to wrap URLs in.
pub fn clean_url(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == '`')
}

/// Extract the lowercase host of a URL, if it parses.
pub fn extract_host(url: &str) -> Option<String> {
    let url = clean_url(url);
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{}", url)))
        .ok()?;
    parsed.host_str().map(|h| h.to_ascii_lowercase())
}

/// Check whether a URL points at a known video platform.
pub fn is_video_platform_host(url: &str) -> bool {
    let Some(host) = extract_host(url) else {
        return false;
    };
    VIDEO_PLATFORM_HOSTS
        .iter()
        .any(|known| host == *known || host.ends_with(&format!(".{}", known)))
}

/// Return the media extension (lowercase, with dot) the URL ends in.
///
/// Checks the parsed path first so query strings and fragments are ignored,
/// then the raw string end.
pub(crate) fn media_extension(url: &str) -> Option<&'static str> {
    let url = clean_url(url);
    let path = Url::parse(url)
        .map(|u| u.path().to_ascii_lowercase())
        .unwrap_or_default();
    let raw = url.to_ascii_lowercase();

    MEDIA_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| path.ends_with(ext) || raw.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host() {
        assert_eq!(
            extract_host("https://WWW.YouTube.com/watch?v=dQw4w9WgXcQ"),
            Some("www.youtube.com".to_string())
        );
        assert_eq!(extract_host("youtu.be/dQw4w9WgXcQ"), Some("youtu.be".to_string()));
        assert_eq!(extract_host("  \"https://vimeo.com/1\"  "), Some("vimeo.com".to_string()));
        assert_eq!(extract_host(""), None);
    }

    #[test]
    fn test_video_platform_hosts() {
        assert!(is_video_platform_host("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_platform_host("https://m.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_platform_host("https://player.vimeo.com/video/1"));
        assert!(is_video_platform_host("https://www.dailymotion.com/video/x7tgad0"));
        assert!(!is_video_platform_host("https://www.imdb.com/title/tt0111161/"));
        assert!(!is_video_platform_host("https://notyoutube.com/watch"));
        assert!(!is_video_platform_host("not a url"));
    }

    #[test]
    fn test_media_extension() {
        assert_eq!(media_extension("https://cdn.example.com/a.MP4"), Some(".mp4"));
        assert_eq!(media_extension("https://cdn.example.com/live/index.m3u8?token=abc"), Some(".m3u8"));
        assert_eq!(media_extension("https://cdn.example.com/a.webm#t=10"), Some(".webm"));
        assert_eq!(media_extension("https://cdn.example.com/watch"), None);
    }
}
