use std::fmt;
use std::sync::Arc;

use trivia_core::model::{AnswerSet, Question, QuestionSet, RecordId};
use trivia_core::scoring::{self, GradedAnswer};

use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a quiz run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    AwaitingName,
    InProgress { index: usize },
    ResultsShown { score: u32 },
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at `index`.
    Moved { index: usize },
    /// The last question was passed; the attempt is scored and must be stored.
    Completed(CompletedQuiz),
}

/// Snapshot of a finished attempt, ready to hand to the response store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedQuiz {
    pub name: String,
    pub answers: AnswerSet,
    pub score: u32,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one participant's run through a question set.
///
/// `AwaitingName → InProgress(index) → ResultsShown`. Every action returns an
/// error when it is not valid in the current phase, and a rejected action
/// never modifies the session.
pub struct QuizSession {
    questions: Arc<QuestionSet>,
    participant: String,
    answers: AnswerSet,
    phase: QuizPhase,
    record_id: Option<RecordId>,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Arc<QuestionSet>) -> Self {
        Self {
            questions,
            participant: String::new(),
            answers: AnswerSet::new(),
            phase: QuizPhase::AwaitingName,
            record_id: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn participant_name(&self) -> &str {
        &self.participant
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn is_name_submitted(&self) -> bool {
        !matches!(self.phase, QuizPhase::AwaitingName)
    }

    #[must_use]
    pub fn is_results_shown(&self) -> bool {
        matches!(self.phase, QuizPhase::ResultsShown { .. })
    }

    /// Final score, once results are shown.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        match self.phase {
            QuizPhase::ResultsShown { score } => Some(score),
            _ => None,
        }
    }

    /// Id of the persisted record, once the store has accepted it.
    #[must_use]
    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::InProgress { index } => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    /// Option previously chosen for the question on screen.
    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.current_question()
            .and_then(|q| self.answers.get(q.text()))
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index() == Some(self.questions.last_index())
    }

    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        let index = self.current_index()?;
        Some(QuizProgress {
            index,
            total: self.questions.len(),
            answered: self.answers.len(),
            is_last: index == self.questions.last_index(),
        })
    }

    /// Per-question breakdown for the results view.
    #[must_use]
    pub fn graded_answers(&self) -> Vec<GradedAnswer<'_>> {
        scoring::grade(&self.questions, &self.answers)
    }

    /// Accept the participant's name and show the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NameAlreadySubmitted` outside `AwaitingName` and
    /// `QuizError::EmptyName` for a blank name.
    pub fn submit_name(&mut self, name: &str) -> Result<(), QuizError> {
        if self.phase != QuizPhase::AwaitingName {
            return Err(QuizError::NameAlreadySubmitted);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::EmptyName);
        }
        self.participant = name.to_string();
        self.phase = QuizPhase::InProgress { index: 0 };
        Ok(())
    }

    /// Choose `option` for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside `InProgress` and
    /// `QuizError::UnknownOption` if `option` is not offered.
    pub fn select_answer(&mut self, option: &str) -> Result<(), QuizError> {
        let question = self.current_question().ok_or(QuizError::NotInProgress)?;
        if !question.has_option(option) {
            return Err(QuizError::UnknownOption {
                option: option.to_string(),
            });
        }
        let text = question.text().to_string();
        self.answers.select(text, option);
        Ok(())
    }

    /// Move to the next question, or score the attempt after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside `InProgress`, which also
    /// makes completion happen at most once.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let index = self.current_index().ok_or(QuizError::NotInProgress)?;

        if index < self.questions.last_index() {
            let index = index + 1;
            self.phase = QuizPhase::InProgress { index };
            return Ok(Advance::Moved { index });
        }

        let score = scoring::score(&self.questions, &self.answers);
        self.phase = QuizPhase::ResultsShown { score };
        Ok(Advance::Completed(CompletedQuiz {
            name: self.participant.clone(),
            answers: self.answers.clone(),
            score,
        }))
    }

    /// Go back one question. Earlier answers stay selected and editable.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside `InProgress` and
    /// `QuizError::AtFirstQuestion` on the first question.
    pub fn retreat(&mut self) -> Result<usize, QuizError> {
        let index = self.current_index().ok_or(QuizError::NotInProgress)?;
        let index = index.checked_sub(1).ok_or(QuizError::AtFirstQuestion)?;
        self.phase = QuizPhase::InProgress { index };
        Ok(index)
    }

    pub(crate) fn set_record_id(&mut self, id: RecordId) {
        self.record_id = Some(id);
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("participant", &self.participant)
            .field("answers_len", &self.answers.len())
            .field("phase", &self.phase)
            .field("record_id", &self.record_id)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn two_questions() -> Arc<QuestionSet> {
        Arc::new(
            QuestionSet::new(vec![
                Question::new("Q1", ["A", "B"], "A").unwrap(),
                Question::new("Q2", ["X", "Y"], "Y").unwrap(),
            ])
            .unwrap(),
        )
    }

    fn started() -> QuizSession {
        let mut session = QuizSession::new(two_questions());
        session.submit_name("Ana").unwrap();
        session
    }

    #[test]
    fn starts_awaiting_name() {
        let session = QuizSession::new(two_questions());
        assert_eq!(session.phase(), QuizPhase::AwaitingName);
        assert!(!session.is_name_submitted());
        assert!(session.current_question().is_none());
        assert!(session.progress().is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut session = QuizSession::new(two_questions());
        assert_eq!(session.submit_name("   "), Err(QuizError::EmptyName));
        assert_eq!(session.phase(), QuizPhase::AwaitingName);
    }

    #[test]
    fn name_is_trimmed_and_accepted_once() {
        let mut session = QuizSession::new(two_questions());
        session.submit_name("  Ana ").unwrap();
        assert_eq!(session.participant_name(), "Ana");
        assert_eq!(session.phase(), QuizPhase::InProgress { index: 0 });

        assert_eq!(
            session.submit_name("Beto"),
            Err(QuizError::NameAlreadySubmitted)
        );
        assert_eq!(session.participant_name(), "Ana");
    }

    #[test]
    fn actions_before_name_are_rejected() {
        let mut session = QuizSession::new(two_questions());
        assert_eq!(session.select_answer("A"), Err(QuizError::NotInProgress));
        assert_eq!(session.advance(), Err(QuizError::NotInProgress));
        assert_eq!(session.retreat(), Err(QuizError::NotInProgress));
        assert_eq!(session.phase(), QuizPhase::AwaitingName);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut session = started();
        let err = session.select_answer("X").unwrap_err();
        assert!(matches!(err, QuizError::UnknownOption { .. }));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn retreat_keeps_answers_editable() {
        let mut session = started();
        session.select_answer("B").unwrap();
        session.advance().unwrap();
        assert_eq!(session.selected_answer(), None);

        assert_eq!(session.retreat(), Ok(0));
        assert_eq!(session.selected_answer(), Some("B"));
        session.select_answer("A").unwrap();
        assert_eq!(session.answers().get("Q1"), Some("A"));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn retreat_at_first_question_is_rejected() {
        let mut session = started();
        assert_eq!(session.retreat(), Err(QuizError::AtFirstQuestion));
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn advancing_past_last_question_scores_once() {
        let mut session = started();
        session.select_answer("A").unwrap();
        assert_eq!(session.advance(), Ok(Advance::Moved { index: 1 }));
        assert!(session.is_last_question());
        session.select_answer("X").unwrap();

        let completed = match session.advance().unwrap() {
            Advance::Completed(c) => c,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(completed.name, "Ana");
        assert_eq!(completed.score, 1);
        assert_eq!(session.score(), Some(1));
        assert!(session.is_results_shown());

        assert_eq!(session.advance(), Err(QuizError::NotInProgress));
        assert_eq!(session.select_answer("Y"), Err(QuizError::NotInProgress));
        assert_eq!(session.score(), Some(1));
    }

    #[test]
    fn skipped_questions_count_as_wrong() {
        let mut session = started();
        session.advance().unwrap();
        let Advance::Completed(completed) = session.advance().unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(completed.score, 0);
        assert!(completed.answers.is_empty());

        let graded = session.graded_answers();
        assert_eq!(graded.len(), 2);
        assert!(graded.iter().all(|g| !g.is_correct && g.chosen.is_none()));
    }

    #[test]
    fn progress_tracks_position() {
        let mut session = started();
        session.select_answer("A").unwrap();
        let progress = session.progress().unwrap();
        assert_eq!(progress.position(), 1);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.answered, 1);
        assert!(!progress.is_last);

        session.advance().unwrap();
        assert!(session.progress().unwrap().is_last);
    }
}
