//! In-memory word2vec text table.
//!
//! The file starts with a `<count> <dimension>` header followed by one
//! `<word> <f1> ... <fN>` row per word, fields separated by single spaces.
//! Everything is read eagerly; lookups afterwards never touch the disk.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Cannot open embedding table {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed reading embedding table: {0}")]
    Read(#[from] io::Error),

    #[error("Invalid embedding table header: {0}")]
    Header(String),

    #[error("Line {line}: expected {expected} vector components, found {found}")]
    Dimension {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: `{value}` is not a number")]
    Float { line: usize, value: String },

    #[error("Embedding table ended after {found} of {expected} rows")]
    Truncated { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, TableError>;

const PREALLOC_ROWS: usize = 1 << 16;
const PREALLOC_VALUES: usize = 1 << 22;

/// Word → vector lookup backed by a single flat buffer.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    dimension: usize,
    index: HashMap<String, usize>,
    data: Vec<f32>,
}

impl EmbeddingTable {
    /// Loads the whole table at `path`, keeping at most `limit` rows when given.
    pub fn load(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading embedding table from {}", path.display());

        let file = File::open(path).map_err(|source| TableError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file), limit)?;

        info!(
            "Loaded {} vectors of dimension {}",
            table.len(),
            table.dimension
        );
        Ok(table)
    }

    pub fn from_reader<R: BufRead>(reader: R, limit: Option<usize>) -> Result<Self> {
        let mut lines = reader.lines();

        let header = lines
            .next()
            .transpose()?
            .ok_or_else(|| TableError::Header("file is empty".to_string()))?;
        let (count, dimension) = parse_header(&header)?;
        let expected = limit.map_or(count, |l| l.min(count));

        let total = expected.checked_mul(dimension).ok_or_else(|| {
            TableError::Header(format!("{count} x {dimension} vectors overflow memory"))
        })?;

        // Header counts are untrusted; pre-allocation is capped.
        let mut table = Self {
            dimension,
            index: HashMap::with_capacity(expected.min(PREALLOC_ROWS)),
            data: Vec::with_capacity(total.min(PREALLOC_VALUES)),
        };

        for row in 0..expected {
            let line_no = row + 2;
            let line = lines.next().transpose()?.ok_or(TableError::Truncated {
                expected,
                found: row,
            })?;
            table.push_row(line.trim_end(), line_no)?;
        }

        Ok(table)
    }

    fn push_row(&mut self, line: &str, line_no: usize) -> Result<()> {
        let mut parts = line.split(' ');
        let word = parts.next().unwrap_or_default();

        let start = self.data.len();
        for value in parts {
            let parsed = value.parse::<f32>().map_err(|_| TableError::Float {
                line: line_no,
                value: value.to_string(),
            })?;
            self.data.push(parsed);
        }

        let found = self.data.len() - start;
        if found != self.dimension {
            self.data.truncate(start);
            return Err(TableError::Dimension {
                line: line_no,
                expected: self.dimension,
                found,
            });
        }

        if self.index.contains_key(word) {
            warn!("Duplicate word '{word}' on line {line_no}, keeping the first vector");
            self.data.truncate(start);
            return Ok(());
        }

        self.index.insert(word.to_string(), start / self.dimension.max(1));
        Ok(())
    }

    /// Exact-match lookup; no normalization is applied to `word`.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        let row = *self.index.get(word)?;
        let start = row * self.dimension;
        self.data.get(start..start + self.dimension)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let mut fields = line.split_whitespace().map(str::parse::<usize>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(count)), Some(Ok(dimension)), None) => Ok((count, dimension)),
        _ => Err(TableError::Header(format!(
            "expected `<count> <dimension>`, got `{line}`"
        ))),
    }
}
