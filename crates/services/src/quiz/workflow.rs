use std::sync::Arc;

use storage::responses::ResponseStore;
use tracing::{debug, info};
use trivia_core::model::{QuestionSet, RecordId};

use super::session::{Advance, QuizSession};
use crate::error::QuizFlowError;

/// Result of advancing a session through the loop service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceResult {
    pub is_complete: bool,
    pub score: Option<u32>,
    pub record_id: Option<RecordId>,
}

/// Orchestrates quiz sessions and persists each completed attempt.
#[derive(Clone)]
pub struct QuizLoopService {
    questions: Arc<QuestionSet>,
    responses: ResponseStore,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(questions: Arc<QuestionSet>, responses: ResponseStore) -> Self {
        Self {
            questions,
            responses,
        }
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionSet> {
        Arc::clone(&self.questions)
    }

    /// Start a fresh session awaiting the participant's name.
    #[must_use]
    pub fn start_session(&self) -> QuizSession {
        QuizSession::new(Arc::clone(&self.questions))
    }

    /// Advance the session and store the record when the quiz completes.
    ///
    /// The session reaches `ResultsShown` before the write, so a second call
    /// is rejected and the attempt is stored at most once.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Quiz` if the session is not in progress, or
    /// `QuizFlowError::Storage` if the completed attempt cannot be stored.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<AdvanceResult, QuizFlowError> {
        match session.advance()? {
            Advance::Moved { index } => {
                debug!(index, "advanced to question");
                Ok(AdvanceResult {
                    is_complete: false,
                    score: None,
                    record_id: None,
                })
            }
            Advance::Completed(completed) => {
                let id = self
                    .responses
                    .append(&completed.name, &completed.answers, completed.score)
                    .await?;
                session.set_record_id(id);
                info!(%id, score = completed.score, total = self.questions.len(), "quiz completed");
                Ok(AdvanceResult {
                    is_complete: true,
                    score: Some(completed.score),
                    record_id: Some(id),
                })
            }
        }
    }
}
