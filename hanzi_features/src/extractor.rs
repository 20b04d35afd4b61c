use hanzi_core::{CharacterFrequency, ExtractionReport, FeatureRecord, Segmenter, WordRecord};
use tracing::{debug, info};

use crate::embedding::EmbeddingTable;

/// Joins review words with their embedding vectors.
///
/// Words missing from the table are not errors; they are listed in
/// [`ExtractionReport::skipped`].
pub struct FeatureExtractor<'a, S> {
    table: &'a EmbeddingTable,
    segmenter: S,
}

impl<'a, S: Segmenter> FeatureExtractor<'a, S> {
    pub const fn new(table: &'a EmbeddingTable, segmenter: S) -> Self {
        Self { table, segmenter }
    }

    #[must_use]
    pub fn extract(&self, records: &[WordRecord]) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        for record in records {
            let Some(vector) = self.table.get(&record.primary_form) else {
                debug!("'{}' not in embedding table, skipping", record.primary_form);
                report.skipped.push(record.primary_form.clone());
                continue;
            };

            report.features.push(FeatureRecord {
                word: record.primary_form.clone(),
                vector: vector.to_vec(),
                character_frequency: CharacterFrequency::from_segments(
                    &self.segmenter,
                    &record.primary_form,
                ),
                incorrect_count: record.lapse_count,
                alternate_form: record.alternate_form.clone(),
            });
        }

        info!(
            "Extracted features for {} words, skipped {} not in the embedding table",
            report.features.len(),
            report.skipped.len()
        );
        report
    }
}
