use crate::geometry::Hand;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyAnnealError {
    #[error("IO Error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON Parsing Error in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid key '{token}' on {hand} hand at row {row}, col {col}: {reason}")]
    KeyToken {
        hand: Hand,
        row: usize,
        col: usize,
        token: String,
        reason: String,
    },

    #[error("Invalid locale pair '{key}' -> '{value}': {reason}")]
    LocalePair {
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl KeyAnnealError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type KaResult<T> = Result<T, KeyAnnealError>;
