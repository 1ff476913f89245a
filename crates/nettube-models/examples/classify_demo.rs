//! Demo: video URL classification
//!
//! Run with: cargo run -p nettube-models --example classify_demo

use nettube_models::UrlClassifier;

fn main() {
    let classifier = UrlClassifier::new("http://localhost:3000");

    let test_urls = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ?t=30",
        "\"https://www.youtube.com/embed/dQw4w9WgXcQ\"",
        "https://vimeo.com/76979871",
        "https://www.dailymotion.com/video/x7tgad0",
        "https://cdn.example.com/films/night-train.mp4",
        "https://cdn.example.com/live/index.m3u8",
        "https://www.imdb.com/title/tt0111161/",
        "",
    ];

    for url in test_urls {
        println!("\n{}", "=".repeat(60));
        println!("INPUT: {:?}", url);
        println!("{}", "=".repeat(60));

        let classification = classifier.classify(url);

        println!(
            "{}",
            serde_json::to_string_pretty(&classification)
                .expect("serialization should be infallible")
        );
        if let Some(thumbnail) = classification.thumbnail_url() {
            println!("thumbnail: {}", thumbnail);
        }
        if classification.playback.needs_external_link() {
            println!("player should offer an \"open externally\" link");
        }
    }
}
