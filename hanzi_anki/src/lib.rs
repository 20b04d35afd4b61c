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

//! AnkiConnect client that resolves the current review set into [`WordRecord`]s.
//!
//! [`WordRecord`]: hanzi_core::WordRecord

mod client;
mod error;
mod query;
pub mod retry;
mod transport;

pub use client::{AnkiClient, CardInfo, NoteField, NoteInfo};
pub use error::{AnkiError, Result};
pub use query::FetchConfig;
pub use transport::{API_VERSION, AnkiTransport, HttpTransport, TransportConfig};
