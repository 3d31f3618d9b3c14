use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question set cannot be empty")]
    EmptySet,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question {text:?} needs at least two options")]
    TooFewOptions { text: String },

    #[error("correct option {correct:?} is not among the options of {text:?}")]
    CorrectNotInOptions { text: String, correct: String },

    #[error("duplicate question text: {text:?}")]
    DuplicateText { text: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Fields are private so a `Question` can only exist in a validated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft", into = "QuestionDraft")]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct: String,
}

/// Unvalidated question shape, as read from a question file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is empty, fewer than two options
    /// are given, or `correct` is not one of `options`.
    pub fn new(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let correct = correct.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { text });
        }
        if !options.contains(&correct) {
            return Err(QuestionError::CorrectNotInOptions { text, correct });
        }

        Ok(Self {
            text,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct
    }

    /// Returns true if `option` is one of this question's choices.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

impl TryFrom<QuestionDraft> for Question {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        Self::new(draft.text, draft.options, draft.correct)
    }
}

impl From<Question> for QuestionDraft {
    fn from(q: Question) -> Self {
        Self {
            text: q.text,
            options: q.options,
            correct: q.correct,
        }
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Fixed, ordered question sequence for a quiz run.
///
/// Answers are keyed by question text, so texts must be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a question set from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptySet` for an empty list, or
    /// `QuestionError::DuplicateText` if two questions share a text.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::EmptySet);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.text()) {
                return Err(QuestionError::DuplicateText {
                    text: q.text().to_string(),
                });
            }
        }
        Ok(Self { questions })
    }

    /// Parse a question set from a JSON array of `{text, options, correct}`.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the JSON is malformed or any question
    /// fails validation.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let questions: Vec<Question> = serde_json::from_str(raw)?;
        Self::new(questions).map_err(serde::de::Error::custom)
    }

    /// The built-in trivia used when no question file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        let raw: [(&str, &[&str], &str); 6] = [
            (
                "¿Dónde comenzó Odres Nuevos?",
                &[
                    "Plaza Castilla, López de Vega con Lincoln",
                    "Hogar de tía Dorcas",
                    "Hogar de los Pastores Oller",
                ],
                "Hogar de tía Dorcas",
            ),
            (
                "¿Cuántas personas se bautizaron en el primer bautismo?",
                &["5", "9", "1"],
                "9",
            ),
            (
                "¿Cuál fue la primera familia en aceptar a Jesús?",
                &[
                    "Familia de Luis y Lucía",
                    "Familia de tía Dorcas",
                    "Familia de Jennifer y Julián",
                ],
                "Familia de Luis y Lucía",
            ),
            ("¿Cuántos años tiene el Pastor?", &["48", "50", "51"], "50"),
            (
                "¿Cuál es el/la miembro más joven de Odres Nuevos RD?",
                &["Galia", "Jimena", "Harmonie"],
                "Harmonie",
            ),
            (
                "¿El año 2024 fue el año de ...?",
                &[
                    "Doble porción",
                    "La Gracia",
                    "La Gran Cosecha",
                    "La Expansión",
                ],
                "La Expansión",
            ),
        ];

        let questions = raw
            .into_iter()
            .filter_map(|(text, options, correct)| {
                Question::new(text, options.iter().copied(), correct).ok()
            })
            .collect();
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed set; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the final question.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
