//! Pure scoring over a question set and the participant's answers.

use crate::model::{AnswerSet, Question, QuestionSet};

/// Number of questions whose stored answer equals the correct option.
///
/// Comparison is exact string equality. Unanswered questions never match but
/// still count toward the total, so the result is always in `[0, len]`.
#[must_use]
pub fn score(questions: &QuestionSet, answers: &AnswerSet) -> u32 {
    let correct = questions
        .iter()
        .filter(|q| answers.get(q.text()) == Some(q.correct_option()))
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}

/// One row of the results view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer<'a> {
    pub question: &'a Question,
    pub chosen: Option<&'a str>,
    pub is_correct: bool,
}

impl GradedAnswer<'_> {
    #[must_use]
    pub fn correct_option(&self) -> &str {
        self.question.correct_option()
    }
}

/// Per-question breakdown in question order.
#[must_use]
pub fn grade<'a>(questions: &'a QuestionSet, answers: &'a AnswerSet) -> Vec<GradedAnswer<'a>> {
    questions
        .iter()
        .map(|question| {
            let chosen = answers.get(question.text());
            GradedAnswer {
                question,
                chosen,
                is_correct: chosen == Some(question.correct_option()),
            }
        })
        .collect()
}
