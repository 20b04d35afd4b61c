use std::collections::HashMap;

use hanzi_core::WordRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::info;

use crate::error::{AnkiError, Result};
use crate::query::FetchConfig;
use crate::transport::AnkiTransport;

#[derive(Debug, Clone, Deserialize)]
pub struct NoteField {
    pub value: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    pub note_id: i64,
    #[serde(default)]
    pub model_name: String,
    pub fields: HashMap<String, NoteField>,
    #[serde(default)]
    pub cards: Vec<i64>,
}

impl NoteInfo {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_id: i64,
    #[serde(default)]
    pub lapses: u32,
    #[serde(default)]
    pub note: i64,
}

/// Typed wrapper over the handful of AnkiConnect actions the review export needs.
pub struct AnkiClient<T> {
    transport: T,
}

impl<T: AnkiTransport> AnkiClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn call<R: DeserializeOwned>(&self, action: &str, params: Value) -> Result<R> {
        let result = self.transport.invoke(action, params).await?;
        serde_json::from_value(result).map_err(|source| AnkiError::Decode {
            action: action.to_string(),
            source,
        })
    }

    pub async fn version(&self) -> Result<u32> {
        self.call("version", json!({})).await
    }

    pub async fn find_notes(&self, query: &str) -> Result<Vec<i64>> {
        self.call("findNotes", json!({ "query": query })).await
    }

    pub async fn notes_info(&self, note_ids: &[i64]) -> Result<Vec<NoteInfo>> {
        self.call("notesInfo", json!({ "notes": note_ids })).await
    }

    pub async fn cards_info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>> {
        self.call("cardsInfo", json!({ "cards": card_ids })).await
    }

    /// Resolves every note in review or learning state into a [`WordRecord`].
    ///
    /// Three round trips at most: search, one batched `notesInfo`, one batched
    /// `cardsInfo`. Records keep the order Anki returned the notes in.
    pub async fn fetch_review_set(&self, config: &FetchConfig) -> Result<Vec<WordRecord>> {
        let query = config.search_query();
        info!("Searching Anki: {query}");

        let note_ids = self.find_notes(&query).await?;
        if note_ids.is_empty() {
            info!("No notes matched the review query");
            return Ok(Vec::new());
        }

        let notes = self.notes_info(&note_ids).await?;
        let card_ids: Vec<i64> = notes.iter().flat_map(|n| n.cards.iter().copied()).collect();
        info!(
            "Resolved {} notes with {} cards",
            notes.len(),
            card_ids.len()
        );

        let lapses: HashMap<i64, u32> = if card_ids.is_empty() {
            HashMap::new()
        } else {
            self.cards_info(&card_ids)
                .await?
                .into_iter()
                .map(|card| (card.card_id, card.lapses))
                .collect()
        };

        notes
            .iter()
            .map(|note| to_word_record(note, &lapses, config))
            .collect()
    }
}

fn to_word_record(
    note: &NoteInfo,
    lapses: &HashMap<i64, u32>,
    config: &FetchConfig,
) -> Result<WordRecord> {
    let primary = note
        .field(&config.primary_field)
        .ok_or_else(|| AnkiError::MissingField {
            note_id: note.note_id,
            field: config.primary_field.clone(),
        })?;
    let alternate = note.field(&config.alternate_field).map(str::to_string);

    // None when Anki did not report one of the note's cards.
    let lapse_count = note
        .cards
        .iter()
        .map(|id| lapses.get(id).copied())
        .sum::<Option<u32>>();

    Ok(WordRecord::new(primary, alternate, lapse_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers each action with a canned payload and records every call.
    #[derive(Default)]
    struct CannedTransport {
        responses: HashMap<String, Value>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl CannedTransport {
        fn with(mut self, action: &str, result: Value) -> Self {
            self.responses.insert(action.to_string(), result);
            self
        }

        fn actions(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(a, _)| a.clone())
                .collect()
        }

        fn params(&self, action: &str) -> Value {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .find(|(a, _)| a == action)
                .map(|(_, p)| p.clone())
                .unwrap()
        }
    }

    #[async_trait]
    impl AnkiTransport for CannedTransport {
        async fn invoke(&self, action: &str, params: Value) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((action.to_string(), params));
            self.responses
                .get(action)
                .cloned()
                .ok_or_else(|| AnkiError::Api {
                    action: action.to_string(),
                    message: "unsupported action".to_string(),
                })
        }
    }

    fn note(id: i64, traditional: &str, simplified: &str, cards: &[i64]) -> Value {
        json!({
            "noteId": id,
            "modelName": "Chinese Words Hanzicraft",
            "tags": [],
            "fields": {
                "Traditional": { "value": traditional, "order": 0 },
                "Simplified": { "value": simplified, "order": 1 }
            },
            "cards": cards
        })
    }

    #[tokio::test]
    async fn fetch_sums_lapses_per_note() {
        let transport = CannedTransport::default()
            .with("findNotes", json!([1, 2]))
            .with(
                "notesInfo",
                json!([note(1, "謝謝", "谢谢", &[10, 11]), note(2, "你好", "", &[20])]),
            )
            .with(
                "cardsInfo",
                json!([
                    { "cardId": 10, "lapses": 2, "note": 1 },
                    { "cardId": 11, "lapses": 3, "note": 1 },
                    { "cardId": 20, "lapses": 0, "note": 2 }
                ]),
            );
        let client = AnkiClient::new(transport);

        let records = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap();

        assert_eq!(
            records,
            vec![
                WordRecord::new("謝謝", Some("谢谢".to_string()), Some(5)),
                WordRecord::new("你好", None, Some(0)),
            ]
        );
        assert_eq!(
            client.transport.actions(),
            vec!["findNotes", "notesInfo", "cardsInfo"]
        );
        assert_eq!(
            client.transport.params("cardsInfo"),
            json!({ "cards": [10, 11, 20] })
        );
        assert_eq!(
            client.transport.params("findNotes"),
            json!({ "query": FetchConfig::default().search_query() })
        );
    }

    #[tokio::test]
    async fn empty_search_stops_after_find_notes() {
        let transport = CannedTransport::default().with("findNotes", json!([]));
        let client = AnkiClient::new(transport);

        let records = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(client.transport.actions(), vec!["findNotes"]);
    }

    #[tokio::test]
    async fn note_without_cards_has_zero_lapses() {
        let transport = CannedTransport::default()
            .with("findNotes", json!([1]))
            .with("notesInfo", json!([note(1, "你好", "", &[])]));
        let client = AnkiClient::new(transport);

        let records = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap();

        assert_eq!(records, vec![WordRecord::new("你好", None, Some(0))]);
        assert_eq!(client.transport.actions(), vec!["findNotes", "notesInfo"]);
    }

    #[tokio::test]
    async fn unreported_card_leaves_lapse_count_unknown() {
        let transport = CannedTransport::default()
            .with("findNotes", json!([1, 2]))
            .with(
                "notesInfo",
                json!([note(1, "你好", "", &[10, 11]), note(2, "謝謝", "", &[20])]),
            )
            .with(
                "cardsInfo",
                json!([
                    { "cardId": 10, "lapses": 2 },
                    { "cardId": 20, "lapses": 1 }
                ]),
            );
        let client = AnkiClient::new(transport);

        let records = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap();

        assert_eq!(records[0].lapse_count, None);
        assert_eq!(records[1].lapse_count, Some(1));
    }

    #[tokio::test]
    async fn missing_alternate_field_is_absent() {
        let transport = CannedTransport::default()
            .with("findNotes", json!([7]))
            .with(
                "notesInfo",
                json!([{
                    "noteId": 7,
                    "fields": { "Traditional": { "value": "學生", "order": 0 } },
                    "cards": [70]
                }]),
            )
            .with("cardsInfo", json!([{ "cardId": 70, "lapses": 1 }]));
        let client = AnkiClient::new(transport);

        let records = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap();

        assert_eq!(records, vec![WordRecord::new("學生", None, Some(1))]);
    }

    #[tokio::test]
    async fn missing_primary_field_is_an_error() {
        let transport = CannedTransport::default()
            .with("findNotes", json!([7]))
            .with(
                "notesInfo",
                json!([{
                    "noteId": 7,
                    "fields": { "Simplified": { "value": "学生", "order": 1 } },
                    "cards": []
                }]),
            );
        let client = AnkiClient::new(transport);

        let err = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AnkiError::MissingField { note_id: 7, ref field } if field == "Traditional"
        ));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let transport = CannedTransport::default().with("findNotes", json!({ "oops": true }));
        let client = AnkiClient::new(transport);

        let err = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AnkiError::Decode { ref action, .. } if action == "findNotes"));
    }

    #[tokio::test]
    async fn failed_batch_call_aborts_fetch() {
        let transport = CannedTransport::default().with("findNotes", json!([1]));
        let client = AnkiClient::new(transport);

        let err = client
            .fetch_review_set(&FetchConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AnkiError::Api { ref action, .. } if action == "notesInfo"));
    }

    #[tokio::test]
    async fn custom_field_names_are_honoured() {
        let transport = CannedTransport::default()
            .with("findNotes", json!([3]))
            .with(
                "notesInfo",
                json!([{
                    "noteId": 3,
                    "fields": {
                        "Hanzi": { "value": "電腦", "order": 0 },
                        "Jianti": { "value": "电脑", "order": 1 }
                    },
                    "cards": [30]
                }]),
            )
            .with("cardsInfo", json!([{ "cardId": 30, "lapses": 4 }]));
        let client = AnkiClient::new(transport);
        let config = FetchConfig {
            primary_field: "Hanzi".to_string(),
            alternate_field: "Jianti".to_string(),
            ..FetchConfig::default()
        };

        let records = client.fetch_review_set(&config).await.unwrap();

        assert_eq!(
            records,
            vec![WordRecord::new("電腦", Some("电脑".to_string()), Some(4))]
        );
    }
}
