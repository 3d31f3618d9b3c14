mod answers;
mod confirmation;
mod ids;
mod question;
mod record;

pub use answers::AnswerSet;
pub use confirmation::Confirmation;
pub use ids::{ParseIdError, RecordId};
pub use question::{Question, QuestionDraft, QuestionError, QuestionSet};
pub use record::ScoredRecord;
