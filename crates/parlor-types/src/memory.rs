//! Long-term memory types.
//!
//! A memory record is a short fact stored in the vector search backend
//! and surfaced to the model through the recall capability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single memory record stored in the search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: Uuid,
    /// The remembered text.
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl MemoryRecord {
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            created_at,
        }
    }
}

/// A memory record with its search relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMemory {
    pub record: MemoryRecord,
    /// Similarity score as reported by the search backend (higher is
    /// more relevant).
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_record_new_assigns_id() {
        let a = MemoryRecord::new("likes rust", Utc::now());
        let b = MemoryRecord::new("likes rust", Utc::now());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_ranked_memory_serde_roundtrip() {
        let ranked = RankedMemory {
            record: MemoryRecord::new("prefers tea", Utc::now()),
            score: 0.92,
        };
        let json = serde_json::to_string(&ranked).unwrap();
        let parsed: RankedMemory = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.record.text, "prefers tea");
        assert!((parsed.score - 0.92).abs() < f32::EPSILON);
    }
}
