mod progress;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::{QuizError, QuizFlowError};
pub use progress::QuizProgress;
pub use session::{Advance, CompletedQuiz, QuizPhase, QuizSession};
pub use workflow::{AdvanceResult, QuizLoopService};
