use std::path::PathBuf;

use hanzi_anki::{AnkiClient, HttpTransport};
use hanzi_config::Config;
use tracing::info;

/// Strategy for displaying configuration information.
///
/// Prints the effective configuration (file values merged over defaults)
/// and checks whether AnkiConnect answers at the configured endpoint.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default(input.as_deref())?;

        println!("=== hanzi Configuration ===\n");

        println!("AnkiConnect:");
        println!("  Endpoint: {}", config.anki.endpoint);
        match config.anki.timeout_secs {
            Some(secs) => println!("  Timeout: {secs}s"),
            None => println!("  Timeout: (none)"),
        }
        println!("  Retry Delays: {}", format_delays(&config.anki.retry_delays_secs));

        info!("Probing AnkiConnect");
        let status = match HttpTransport::new(&config.anki) {
            Ok(transport) => AnkiClient::new(transport).version().await,
            Err(e) => Err(e),
        };
        match status {
            Ok(version) => println!("  Status: Connected (API version {version})"),
            Err(e) => {
                println!("  Status: Unreachable");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Review Set:");
        println!("  Note Type: {}", config.review.note_type);
        println!(
            "  Deck: {}",
            config.review.deck.as_deref().unwrap_or("(any)")
        );
        println!("  Primary Field: {}", config.review.primary_field);
        println!("  Alternate Field: {}", config.review.alternate_field);
        println!("  Query: {}", config.review.search_query());
        println!();

        println!("Embedding Table:");
        let model = &config.embedding.model_path;
        let present = if model.exists() { "" } else { " (missing)" };
        println!("  Path: {}{present}", model.display());
        if let Some(limit) = config.embedding.limit {
            println!("  Row Limit: {limit}");
        }
        println!("  Segmenter: {:?}", config.embedding.segmenter);
        println!();

        println!("Output:");
        println!("  Path: {}", config.output.path.display());

        if let Err(e) = config.validate() {
            println!();
            println!("⚠️  Invalid configuration: {e}");
        }

        Ok(())
    }
}

fn format_delays(delays: &[u64]) -> String {
    if delays.is_empty() {
        return "(no retry)".to_string();
    }
    delays
        .iter()
        .map(|d| format!("{d}s"))
        .collect::<Vec<_>>()
        .join(", ")
}
