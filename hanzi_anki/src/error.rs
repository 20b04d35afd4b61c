use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnkiError>;

#[derive(Debug, Error)]
pub enum AnkiError {
    #[error("AnkiConnect request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AnkiConnect rejected `{action}`: {message}")]
    Api { action: String, message: String },

    #[error("AnkiConnect response to `{action}` has no result")]
    MissingResult { action: String },

    #[error("Unexpected AnkiConnect payload for `{action}`: {source}")]
    Decode {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Note {note_id} has no `{field}` field")]
    MissingField { note_id: i64, field: String },
}
