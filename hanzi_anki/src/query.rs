use serde::{Deserialize, Serialize};

/// Which notes make up the review set and which fields hold the word forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Anki note type the words are stored under.
    #[serde(default = "FetchConfig::default_note_type")]
    pub note_type: String,

    /// Optional deck restriction, added to the search as `"deck:<name>"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,

    #[serde(default = "FetchConfig::default_primary_field")]
    pub primary_field: String,

    #[serde(default = "FetchConfig::default_alternate_field")]
    pub alternate_field: String,
}

impl FetchConfig {
    fn default_note_type() -> String {
        "Chinese Words Hanzicraft".to_string()
    }

    fn default_primary_field() -> String {
        "Traditional".to_string()
    }

    fn default_alternate_field() -> String {
        "Simplified".to_string()
    }

    /// Anki search string selecting cards in review or learning state.
    #[must_use]
    pub fn search_query(&self) -> String {
        let mut query = format!(
            "\"note:{}\" (is:review OR is:learn)",
            escape(&self.note_type)
        );
        if let Some(deck) = self.deck.as_deref().filter(|d| !d.is_empty()) {
            query = format!("{query} \"deck:{}\"", escape(deck));
        }
        query
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            note_type: Self::default_note_type(),
            deck: None,
            primary_field: Self::default_primary_field(),
            alternate_field: Self::default_alternate_field(),
        }
    }
}

fn escape(term: &str) -> String {
    term.replace('"', "\\\"")
}
