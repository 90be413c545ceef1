//! Request and response models for the record store

use serde::{Deserialize, Serialize};

/// The fixed set of collections served by the store.
///
/// Both collections share the same column layout and differ only by name.
/// Table names are spliced into SQL exclusively from this enum, never from
/// request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Todo,
    Number,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Todo, Collection::Number];

    /// Name of the SQL table backing this collection.
    pub fn table(self) -> &'static str {
        match self {
            Collection::Todo => "todos",
            Collection::Number => "numbers",
        }
    }

    /// Capitalized entity name used in client-facing messages.
    pub fn entity(self) -> &'static str {
        match self {
            Collection::Todo => "Todo",
            Collection::Number => "Number",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// One row in either collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub number: i64,
}

/// A record as sent by clients: everything but the store-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub number: i64,
}

impl RecordInput {
    /// The record this input becomes once the store assigns `id`.
    pub fn into_record(self, id: i64) -> Record {
        Record {
            id,
            title: self.title,
            completed: self.completed,
            number: self.number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedRequest {
    pub todo: RecordInput,
    pub number: RecordInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedResponse {
    pub todo: Record,
    pub number: Record,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub path: String,
    pub size_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_input_defaults() {
        let input: RecordInput = serde_json::from_str(r#"{"title": "buy milk"}"#).unwrap();
        assert_eq!(input.title, "buy milk");
        assert!(!input.completed);
        assert_eq!(input.number, 0);
    }

    #[test]
    fn record_input_missing_title_rejected() {
        let result = serde_json::from_str::<RecordInput>(r#"{"completed": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn collection_names() {
        assert_eq!(Collection::Todo.table(), "todos");
        assert_eq!(Collection::Todo.entity(), "Todo");
        assert_eq!(Collection::Number.table(), "numbers");
        assert_eq!(Collection::Number.entity(), "Number");
    }
}
