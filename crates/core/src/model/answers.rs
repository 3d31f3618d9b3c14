use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options chosen by a participant, keyed by question text.
///
/// May be sparse: questions the participant never answered have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `option` for `question`, replacing any earlier choice.
    pub fn select(&mut self, question: impl Into<String>, option: impl Into<String>) {
        self.0.insert(question.into(), option.into());
    }

    #[must_use]
    pub fn get(&self, question: &str) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

impl<Q: Into<String>, A: Into<String>> FromIterator<(Q, A)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (Q, A)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(q, a)| (q.into(), a.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselection_overwrites() {
        let mut answers = AnswerSet::new();
        answers.select("Q1", "A");
        answers.select("Q1", "B");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("Q1"), Some("B"));
        assert_eq!(answers.get("Q2"), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let answers: AnswerSet = [("Q1", "A")].into_iter().collect();
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"Q1":"A"}"#);
    }
}
