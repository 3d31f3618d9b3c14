use std::sync::Arc;

use storage::repository::Storage;
use storage::responses::ResponseStore;
use trivia_core::model::QuestionSet;

use crate::error::AppServicesError;
use crate::quiz::QuizLoopService;
use crate::responses::ResponseBrowser;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    responses: ResponseStore,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        questions: QuestionSet,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, questions))
    }

    /// Build services over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(questions: QuestionSet) -> Self {
        Self::from_storage(&Storage::in_memory(), questions)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, questions: QuestionSet) -> Self {
        let responses = storage.responses();
        let quiz_loop = Arc::new(QuizLoopService::new(
            Arc::new(questions),
            responses.clone(),
        ));
        Self {
            responses,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn responses(&self) -> ResponseStore {
        self.responses.clone()
    }

    /// Open the saved-responses browser, hydrated from the store.
    pub async fn open_browser(&self) -> ResponseBrowser {
        ResponseBrowser::open(self.responses.clone()).await
    }
}
