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
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Enriches review words with embedding vectors and segment frequencies.

pub mod embedding;
mod extractor;
mod segmenter;

pub use embedding::{EmbeddingTable, TableError};
pub use extractor::FeatureExtractor;
pub use segmenter::JiebaSegmenter;
