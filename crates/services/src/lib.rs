#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz;
pub mod responses;

pub use app_services::AppServices;
pub use error::{AppServicesError, BrowserError, QuizError, QuizFlowError};
pub use quiz::{Advance, AdvanceResult, CompletedQuiz, QuizLoopService, QuizPhase, QuizProgress, QuizSession};
pub use responses::ResponseBrowser;
