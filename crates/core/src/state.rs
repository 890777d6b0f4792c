//! Best-effort reads of JSON files written by the bot.
//!
//! The bot owns these files and may be mid-write when we look, so a missing,
//! empty or truncated file reads as the empty value of the expected shape.

use crate::external::best_effort_sync;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

/// Errors from reading a state file. Only surfaced by [`StateReader::try_read`].
#[derive(Error, Debug)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct StateReader;

impl StateReader {
    /// Reads and decodes `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON of type `T`.
    pub fn try_read<T: DeserializeOwned>(path: &Path) -> Result<T, StateError> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Reads a JSON object, e.g. the bot's running state. Empty on any failure.
    #[must_use]
    pub fn read_map(path: &Path) -> Map<String, Value> {
        best_effort_sync(
            &path.display().to_string(),
            || Self::try_read(path),
            Map::new(),
        )
    }

    /// Reads a JSON array, e.g. the trade history. Empty on any failure.
    #[must_use]
    pub fn read_list(path: &Path) -> Vec<Value> {
        best_effort_sync(
            &path.display().to_string(),
            || Self::try_read(path),
            Vec::new(),
        )
    }

    /// Reads any JSON document verbatim. `{}` on any failure.
    #[must_use]
    pub fn read_document(path: &Path) -> Value {
        best_effort_sync(
            &path.display().to_string(),
            || Self::try_read(path),
            Value::Object(Map::new()),
        )
    }
}
