//! Processed-record and conversation input files.
//!
//! Processed records are a pretty-printed JSON array of `PatientRecord`;
//! a malformed element is skipped on load.
//! Conversation input is a JSON array whose elements are either objects
//! (`{ "patient_id"?, "conversation", ... }`) or bare strings; any element that
//! is neither is skipped with a warning rather than failing the load.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use carepulse_contracts::{
    error::{CarePulseError, CarePulseResult},
    patient::{ConversationRow, PatientRecord},
};

/// The processed-records file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record. A missing file means nothing has been ingested yet.
    ///
    /// The file must be a JSON array; an element that is not a valid record
    /// is skipped with a warning so the rest of the population still loads.
    pub fn load(&self) -> CarePulseResult<Vec<PatientRecord>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no processed records yet");
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| CarePulseError::StorageError {
            reason: format!("failed to read records '{}': {}", self.path.display(), e),
        })?;
        let elements: Vec<Value> = serde_json::from_str(&contents).map_err(|e| CarePulseError::StorageError {
            reason: format!("failed to parse records '{}': {}", self.path.display(), e),
        })?;

        let total = elements.len();
        let records: Vec<PatientRecord> = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match serde_json::from_value(element) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(record = index, error = %e, "skipping malformed patient record");
                    None
                }
            })
            .collect();

        info!(path = %self.path.display(), records = records.len(), skipped = total - records.len(), "records loaded");
        Ok(records)
    }

    /// Replace the file with `records`.
    pub fn save(&self, records: &[PatientRecord]) -> CarePulseResult<()> {
        let contents = serde_json::to_string_pretty(records).map_err(|e| CarePulseError::StorageError {
            reason: format!("failed to serialize records: {}", e),
        })?;
        crate::write_file(&self.path, &contents)?;
        info!(path = %self.path.display(), records = records.len(), "records saved");
        Ok(())
    }
}

/// Read a conversation batch from `path`.
pub fn load_conversations(path: &Path) -> CarePulseResult<Vec<ConversationRow>> {
    let contents = std::fs::read_to_string(path).map_err(|e| CarePulseError::StorageError {
        reason: format!("failed to read conversations '{}': {}", path.display(), e),
    })?;
    parse_conversations(&contents)
}

/// Parse a conversation batch, skipping elements that are not rows.
pub fn parse_conversations(contents: &str) -> CarePulseResult<Vec<ConversationRow>> {
    let elements: Vec<Value> = serde_json::from_str(contents).map_err(|e| CarePulseError::StorageError {
        reason: format!("conversation input must be a JSON array: {}", e),
    })?;

    let mut rows = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match element {
            Value::String(text) => rows.push(ConversationRow::from_text(text)),
            Value::Object(_) => match serde_json::from_value::<ConversationRow>(element) {
                Ok(row) => rows.push(row),
                Err(e) => warn!(row = index, error = %e, "skipping malformed conversation row"),
            },
            other => warn!(row = index, kind = %json_kind(&other), "skipping non-object conversation row"),
        }
    }

    info!(rows = rows.len(), "loaded conversations");
    Ok(rows)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
