use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use hanzi_anki::{FetchConfig, TransportConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub anki: TransportConfig,
    #[serde(default)]
    pub review: FetchConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbeddingConfig {
    /// word2vec text file.
    #[serde(default = "EmbeddingConfig::default_model_path")]
    pub model_path: PathBuf,
    /// Read at most this many rows of the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub segmenter: SegmenterKind,
}

/// How words are split before counting `character_frequency`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// jieba dictionary segmentation
    #[default]
    Jieba,
    /// one token per character
    Chars,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_path: Self::default_model_path(),
            limit: None,
            segmenter: SegmenterKind::default(),
        }
    }
}

impl EmbeddingConfig {
    fn default_model_path() -> PathBuf {
        PathBuf::from("./sgns.merge.word")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl OutputConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("features_dataset.csv")
    }
}

pub const CONFIG_TEMPLATE: &str = r#"{
  "anki": {
    "endpoint": "http://localhost:8765",
    "retry_delays_secs": []
  },
  "review": {
    "note_type": "Chinese Words Hanzicraft",
    "primary_field": "Traditional",
    "alternate_field": "Simplified"
  },
  "embedding": {
    "model_path": "./sgns.merge.word",
    "segmenter": "jieba"
  },
  "output": {
    "path": "features_dataset.csv"
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("hanzi"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `explicit` if given, else `~/hanzi/config.json` when present,
    /// else the built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let config_path = Self::default_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let endpoint = url::Url::parse(&self.anki.endpoint)
            .with_context(|| format!("Invalid AnkiConnect endpoint: {}", self.anki.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!(
                "AnkiConnect endpoint must be http or https, got {}",
                endpoint.scheme()
            );
        }

        if self.review.note_type.trim().is_empty() {
            anyhow::bail!("review.note_type must not be empty");
        }
        if self.review.primary_field.trim().is_empty() {
            anyhow::bail!("review.primary_field must not be empty");
        }
        if self.embedding.model_path.as_os_str().is_empty() {
            anyhow::bail!("embedding.model_path must not be empty");
        }
        if self.output.path.as_os_str().is_empty() {
            anyhow::bail!("output.path must not be empty");
        }
        Ok(())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::write_template(&config_path)?;
        Ok(config_path)
    }

    /// Writes [`CONFIG_TEMPLATE`] to `path`, refusing to replace an existing file.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        std::fs::write(path, CONFIG_TEMPLATE)?;
        info!("Created config file at {}", path.display());
        Ok(())
    }
}
