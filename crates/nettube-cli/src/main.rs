//! NetTube catalog command-line tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nettube_catalog::config::parse_platforms;
use nettube_catalog::{CatalogConfig, CatalogPipeline, DEFAULT_CATEGORIES};
use nettube_models::{CatalogEntry, Classification, UrlClassifier, DEFAULT_ORIGIN};

#[derive(Debug, Parser)]
#[command(name = "nettube", version, about = "Build a playable video catalog from Gemini search results")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch category rows and print the catalog as JSON
    Fetch {
        /// Category to fetch (repeatable); defaults to the home-screen rows
        #[arg(short, long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Comma-separated platforms accepted from live results (e.g. youtube,vimeo)
        #[arg(long, value_name = "LIST")]
        platforms: Option<String>,

        /// Accept YouTube results only
        #[arg(long, conflicts_with = "platforms")]
        youtube_only: bool,
    },

    /// Classify video URLs and print their embeddable form
    Classify {
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,

        /// Origin of the page embedding the player
        #[arg(long, env = "APP_ORIGIN", default_value = DEFAULT_ORIGIN)]
        origin: String,
    },

    /// Print the JSON schema of a catalog entry
    Schema,
}

#[derive(Debug, Serialize)]
struct ClassifiedUrl<'a> {
    input: &'a str,
    #[serde(flatten)]
    classification: Classification,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch {
            categories,
            platforms,
            youtube_only,
        } => {
            let mut config = CatalogConfig::from_env();
            if let Some(list) = platforms {
                config.allowed_platforms = parse_platforms(&list);
            }
            if youtube_only {
                config = config.youtube_only();
            }
            info!("Catalog config: {:?}", config);

            let pipeline = CatalogPipeline::from_config(config);
            info!(live = pipeline.has_model(), "Fetching catalog");
            let catalog = if categories.is_empty() {
                pipeline.load_catalog(DEFAULT_CATEGORIES).await
            } else {
                pipeline.load_catalog(categories.as_slice()).await
            };

            print_json(&catalog, cli.pretty)
        }
        Command::Classify { urls, origin } => {
            let classifier = UrlClassifier::new(origin);
            let results: Vec<_> = urls
                .iter()
                .map(|url| ClassifiedUrl {
                    input: url,
                    classification: classifier.classify(url),
                })
                .collect();

            print_json(&results, cli.pretty)
        }
        Command::Schema => {
            let schema = schemars::schema_for!(CatalogEntry);
            print_json(&schema, true)
        }
    }
}

/// Initialize tracing on stderr: colored text for dev, JSON when
/// `LOG_FORMAT=json`.
fn init_tracing() -> Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("nettube_catalog=info".parse()?)
        .add_directive("nettube_cli=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch_arguments() {
        let cli = Cli::try_parse_from([
            "nettube",
            "fetch",
            "--category",
            "Pop Chart Toppers",
            "-c",
            "K-Pop World Stage",
            "--platforms",
            "youtube,vimeo",
            "--pretty",
        ])
        .unwrap();

        assert!(cli.pretty);
        match cli.command {
            Command::Fetch {
                categories,
                platforms,
                youtube_only,
            } => {
                assert_eq!(categories, vec!["Pop Chart Toppers", "K-Pop World Stage"]);
                assert_eq!(platforms.as_deref(), Some("youtube,vimeo"));
                assert!(!youtube_only);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_classify_requires_url() {
        assert!(Cli::try_parse_from(["nettube", "classify"]).is_err());
    }

    #[test]
    fn test_youtube_only_conflicts_with_platforms() {
        assert!(Cli::try_parse_from([
            "nettube",
            "fetch",
            "--youtube-only",
            "--platforms",
            "vimeo"
        ])
        .is_err());
    }

    #[test]
    fn test_classified_url_flattens_classification() {
        let classifier = UrlClassifier::new("https://nettube.example");
        let output = ClassifiedUrl {
            input: "https://youtu.be/dQw4w9WgXcQ",
            classification: classifier.classify("https://youtu.be/dQw4w9WgXcQ"),
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["input"], "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(value["source_type"], "youtube");
        assert_eq!(value["canonical_id"], "dQw4w9WgXcQ");
    }
}
