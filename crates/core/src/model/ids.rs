use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Durable identifier of a persisted quiz record.
///
/// Issued by the response store from a monotonic counter; never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a new `RecordId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an id from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse RecordId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for RecordId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(RecordId::new).map_err(|_| ParseIdError {
            raw: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_record_id_from_str() {
        let id: RecordId = "123".parse().unwrap();
        assert_eq!(id, RecordId::new(123));
    }

    #[test]
    fn test_record_id_from_str_invalid() {
        assert!("not-a-number".parse::<RecordId>().is_err());
        assert!("-1".parse::<RecordId>().is_err());
        assert!("".parse::<RecordId>().is_err());
    }

    #[test]
    fn record_ids_order_numerically() {
        assert!(RecordId::new(2) < RecordId::new(10));
    }
}
