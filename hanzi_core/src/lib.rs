#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod frequency;

pub use frequency::CharacterFrequency;

/// One reviewed note as reported by Anki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    /// Traditional form, used as the embedding lookup key.
    pub primary_form: String,
    /// Simplified form, when the note carries one.
    pub alternate_form: Option<String>,
    /// Sum of lapses over the note's cards, `Some(0)` for a note without cards.
    /// `None` when Anki did not report one of the cards.
    pub lapse_count: Option<u32>,
}

impl WordRecord {
    /// Builds a record, treating an empty alternate form as absent.
    #[must_use]
    pub fn new(
        primary_form: impl Into<String>,
        alternate_form: Option<String>,
        lapse_count: Option<u32>,
    ) -> Self {
        Self {
            primary_form: primary_form.into(),
            alternate_form: alternate_form.filter(|s| !s.is_empty()),
            lapse_count,
        }
    }
}

/// A word that was found in the embedding table, with its derived features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub word: String,
    pub vector: Vec<f32>,
    pub character_frequency: CharacterFrequency,
    pub incorrect_count: Option<u32>,
    pub alternate_form: Option<String>,
}

/// Result of running the extractor over a review set.
///
/// Every input word ends up in exactly one of `features` or `skipped`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    pub features: Vec<FeatureRecord>,
    /// Words with no entry in the embedding table, in input order.
    pub skipped: Vec<String>,
}

impl ExtractionReport {
    #[must_use]
    pub fn processed(&self) -> usize {
        self.features.len() + self.skipped.len()
    }
}

/// Splits text without explicit word boundaries into tokens.
pub trait Segmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Treats every `char` as its own token. Selected with `"segmenter": "chars"`
/// for decks of single characters, where dictionary segmentation adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    }
}
