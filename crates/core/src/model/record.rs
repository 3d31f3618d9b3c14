use serde::{Deserialize, Serialize};

use crate::model::{AnswerSet, RecordId};

/// A completed, scored quiz attempt as held by the response store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: RecordId,
    pub name: String,
    pub answers: AnswerSet,
    pub score: u32,
}

impl ScoredRecord {
    /// Case-insensitive substring match against the participant name.
    ///
    /// An empty query matches every record.
    #[must_use]
    pub fn name_matches(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ScoredRecord {
        ScoredRecord {
            id: RecordId::new(1),
            name: name.to_string(),
            answers: AnswerSet::new(),
            score: 0,
        }
    }

    #[test]
    fn name_match_ignores_case() {
        let r = record("Ana María");
        assert!(r.name_matches("ana"));
        assert!(r.name_matches("MARÍA"));
        assert!(r.name_matches(""));
        assert!(!r.name_matches("beto"));
    }
}
