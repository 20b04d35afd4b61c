use std::path::PathBuf;

use anyhow::Context;
use hanzi_anki::{AnkiClient, AnkiTransport, HttpTransport};
use hanzi_config::{Config, SegmenterKind};
use hanzi_core::{CharSegmenter, Segmenter};
use hanzi_export::export_csv;
use hanzi_features::{EmbeddingTable, FeatureExtractor, JiebaSegmenter};
use tracing::info;

/// Input parameters for the Run command strategy. Every `Some` overrides the config.
#[derive(Debug, Clone, Default)]
pub struct RunInput {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub note_type: Option<String>,
    pub deck: Option<String>,
    pub endpoint: Option<String>,
}

impl RunInput {
    fn apply(self, config: &mut Config) {
        if let Some(output) = self.output {
            config.output.path = output;
        }
        if let Some(model) = self.model {
            config.embedding.model_path = model;
        }
        if let Some(note_type) = self.note_type {
            config.review.note_type = note_type;
        }
        if let Some(deck) = self.deck {
            config.review.deck = Some(deck);
        }
        if let Some(endpoint) = self.endpoint {
            config.anki.endpoint = endpoint;
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub exported: usize,
    pub skipped: Vec<String>,
}

/// Strategy for the fetch → enrich → export pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RunStrategy;

impl super::CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load_or_default(input.config.as_deref())?;
        input.apply(&mut config);
        config.validate()?;

        let client = AnkiClient::new(HttpTransport::new(&config.anki)?);
        let summary = match config.embedding.segmenter {
            SegmenterKind::Jieba => run_pipeline(&client, JiebaSegmenter::new(), &config).await?,
            SegmenterKind::Chars => run_pipeline(&client, CharSegmenter, &config).await?,
        };

        println!(
            "Exported {} of {} review words to {} ({} not in the embedding table)",
            summary.exported,
            summary.fetched,
            config.output.path.display(),
            summary.skipped.len()
        );
        Ok(())
    }
}

/// Runs the three stages in order. Nothing is written unless fetching and
/// loading the table both succeed.
pub async fn run_pipeline<T, S>(
    client: &AnkiClient<T>,
    segmenter: S,
    config: &Config,
) -> anyhow::Result<RunSummary>
where
    T: AnkiTransport,
    S: Segmenter,
{
    let words = client
        .fetch_review_set(&config.review)
        .await
        .context("Failed to fetch the review set from AnkiConnect")?;
    info!("Fetched {} review words", words.len());

    let table = EmbeddingTable::load(&config.embedding.model_path, config.embedding.limit)?;
    let report = FeatureExtractor::new(&table, segmenter).extract(&words);

    let exported = export_csv(&report.features, &config.output.path)?;

    Ok(RunSummary {
        fetched: words.len(),
        exported,
        skipped: report.skipped,
    })
}
