use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::{AnkiError, Result};
use crate::retry::retry_with_backoff;

/// AnkiConnect protocol version sent with every request.
pub const API_VERSION: u32 = 6;

/// Sends one AnkiConnect action and returns its `result` payload.
#[async_trait]
pub trait AnkiTransport: Send + Sync {
    async fn invoke(&self, action: &str, params: Value) -> Result<Value>;
}

/// Connection settings for the AnkiConnect endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "TransportConfig::default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout (seconds). Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Delay before each extra attempt (seconds). Empty means no retry.
    #[serde(default)]
    pub retry_delays_secs: Vec<u64>,
}

impl TransportConfig {
    fn default_endpoint() -> String {
        "http://localhost:8765".to_string()
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            timeout_secs: None,
            retry_delays_secs: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// [`AnkiTransport`] over HTTP.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    retry_delays: Vec<Duration>,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        // AnkiConnect only listens locally, so system proxies never apply.
        let mut builder = Client::builder().no_proxy();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        info!("Creating AnkiConnect transport for {}", config.endpoint);
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            retry_delays: config
                .retry_delays_secs
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn try_send(&self, request: &Value) -> std::result::Result<Envelope, reqwest::Error> {
        self.client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Envelope>()
            .await
    }
}

#[async_trait]
impl AnkiTransport for HttpTransport {
    async fn invoke(&self, action: &str, params: Value) -> Result<Value> {
        let request = json!({
            "action": action,
            "params": params,
            "version": API_VERSION,
        });

        debug!("Sending AnkiConnect action: {action}");
        let envelope = retry_with_backoff(|| self.try_send(&request), &self.retry_delays).await?;

        if let Some(message) = envelope.error {
            return Err(AnkiError::Api {
                action: action.to_string(),
                message,
            });
        }

        envelope.result.ok_or_else(|| AnkiError::MissingResult {
            action: action.to_string(),
        })
    }
}
