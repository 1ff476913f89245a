//! Fallback dataset.
//!
//! A fixed, hand-curated list of known-good entries per category. Used when
//! live retrieval is impossible or yields nothing, so every category row can
//! always be rendered.

use nettube_models::RawCandidate;

/// Key used when a category has no dedicated seed list.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Trending English Movies";

/// A curated seed record.
#[derive(Debug, Clone, Copy)]
struct Seed {
    title: &'static str,
    video_url: &'static str,
    description: &'static str,
    year: &'static str,
    rating: &'static str,
    duration: &'static str,
}

impl Seed {
    fn to_candidate(self) -> RawCandidate {
        RawCandidate::new(self.title, self.video_url)
            .with_description(self.description)
            .with_metadata(self.year, self.rating, self.duration)
            .with_platform("youtube")
    }
}

const TRENDING_ENGLISH_MOVIES: &[Seed] = &[
    Seed {
        title: "Midnight Crossing",
        video_url: "https://www.youtube.com/watch?v=S32yS58v8-M",
        description: "Strangers on the last ferry of the night discover they share a secret.",
        year: "2023",
        rating: "PG-13",
        duration: "1h 52m",
    },
    Seed {
        title: "The Long Horizon",
        video_url: "https://www.youtube.com/watch?v=V6S9C-O5L7Q",
        description: "A retired pilot takes one final flight across the Atlantic.",
        year: "2022",
        rating: "PG",
        duration: "2h 04m",
    },
    Seed {
        title: "Harbor Lights",
        video_url: "https://www.youtube.com/watch?v=C39P_I4uB1s",
        description: "A coastal town rallies to save its lighthouse from demolition.",
        year: "2024",
        rating: "PG-13",
        duration: "1h 47m",
    },
];

const GLOBAL_TRENDING_MUSIC_VIDEOS: &[Seed] = &[
    Seed {
        title: "Rick Astley - Never Gonna Give You Up (Official Music Video)",
        video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        description: "The 1987 hit that never left the charts of the internet.",
        year: "1987",
        rating: "G",
        duration: "3m 33s",
    },
    Seed {
        title: "Luis Fonsi - Despacito ft. Daddy Yankee",
        video_url: "https://www.youtube.com/watch?v=kJQP7kiw5Fk",
        description: "The Puerto Rican summer anthem that broke streaming records.",
        year: "2017",
        rating: "G",
        duration: "4m 42s",
    },
    Seed {
        title: "PSY - GANGNAM STYLE",
        video_url: "https://www.youtube.com/watch?v=9bZkp7q19f0",
        description: "The K-pop dance phenomenon that became the first billion-view video.",
        year: "2012",
        rating: "G",
        duration: "4m 13s",
    },
];

/// Category name to ordered seed list.
const FALLBACK_TABLE: &[(&str, &[Seed])] = &[
    (DEFAULT_FALLBACK_CATEGORY, TRENDING_ENGLISH_MOVIES),
    ("Global Trending Music Videos", GLOBAL_TRENDING_MUSIC_VIDEOS),
];

/// Resolve the table key for a category: exact match, then
/// case-insensitive match, then [`DEFAULT_FALLBACK_CATEGORY`].
pub fn fallback_key(category: &str) -> &'static str {
    let category = category.trim();
    FALLBACK_TABLE
        .iter()
        .find(|(key, _)| *key == category)
        .or_else(|| {
            FALLBACK_TABLE
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(category))
        })
        .map(|(key, _)| *key)
        .unwrap_or(DEFAULT_FALLBACK_CATEGORY)
}

/// Seed candidates for a category. Never empty.
pub fn seeds_for(category: &str) -> Vec<RawCandidate> {
    let key = fallback_key(category);
    FALLBACK_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, seeds)| seeds.iter().copied().map(Seed::to_candidate).collect())
        .unwrap_or_default()
}

/// Categories with a dedicated seed list.
pub fn fallback_categories() -> impl Iterator<Item = &'static str> {
    FALLBACK_TABLE.iter().map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::blocked_keyword;
    use nettube_models::extract_youtube_id;

    #[test]
    fn test_default_category_seeds() {
        let seeds = seeds_for(DEFAULT_FALLBACK_CATEGORY);
        let ids: Vec<_> = seeds
            .iter()
            .filter_map(|s| s.url().and_then(extract_youtube_id))
            .collect();
        assert_eq!(ids, vec!["S32yS58v8-M", "V6S9C-O5L7Q", "C39P_I4uB1s"]);
    }

    #[test]
    fn test_lookup_order() {
        assert_eq!(fallback_key("Global Trending Music Videos"), "Global Trending Music Videos");
        assert_eq!(fallback_key("global trending music videos "), "Global Trending Music Videos");
        assert_eq!(fallback_key("Obscure Category"), DEFAULT_FALLBACK_CATEGORY);
        assert_eq!(fallback_key(""), DEFAULT_FALLBACK_CATEGORY);
    }

    #[test]
    fn test_every_table_entry_is_non_empty_and_unblocked() {
        for category in fallback_categories() {
            let seeds = seeds_for(category);
            assert!(!seeds.is_empty(), "{} has no seeds", category);
            for seed in seeds {
                let title = seed.title.as_deref().unwrap();
                assert_eq!(blocked_keyword(title), None, "seed '{}' is blocked", title);
                assert!(seed.url().and_then(extract_youtube_id).is_some());
            }
        }
    }

    #[test]
    fn test_unknown_category_uses_default_seeds() {
        assert_eq!(seeds_for("Acoustic & Unplugged Sessions"), seeds_for(DEFAULT_FALLBACK_CATEGORY));
    }
}
