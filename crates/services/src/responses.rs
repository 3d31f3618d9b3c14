//! Saved-responses browser: a hydrated, searchable, one-at-a-time view over
//! the response store.

use storage::responses::{DeleteOutcome, ResponseStore};
use tracing::debug;
use trivia_core::model::{Confirmation, RecordId, ScoredRecord};
use trivia_core::navigation::{Direction, navigate};

use crate::error::BrowserError;

/// Facilitator-facing view of stored attempts.
///
/// Records are loaded once on open and only refreshed by `reload`, which
/// every mutating operation calls before returning.
pub struct ResponseBrowser {
    store: ResponseStore,
    records: Vec<ScoredRecord>,
    query: String,
    results: Vec<ScoredRecord>,
    cursor: usize,
}

impl ResponseBrowser {
    /// Load every stored record and show all of them.
    pub async fn open(store: ResponseStore) -> Self {
        let mut browser = Self {
            store,
            records: Vec::new(),
            query: String::new(),
            results: Vec::new(),
            cursor: 0,
        };
        browser.reload().await;
        browser
    }

    /// Re-read the store and re-apply the current query.
    pub async fn reload(&mut self) {
        self.records = self.store.load_all().await.into_values().collect();
        self.apply_query();
        debug!(records = self.records.len(), results = self.results.len(), "responses reloaded");
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Filter by case-insensitive name substring and go back to the first match.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = 0;
        self.apply_query();
    }

    /// Matching records in id order.
    #[must_use]
    pub fn results(&self) -> &[ScoredRecord] {
        &self.results
    }

    /// Number of records in the store, ignoring the query.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current(&self) -> Option<&ScoredRecord> {
        self.results.get(self.cursor)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.results.len()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Step forward; inert on the last match.
    pub fn next(&mut self) -> usize {
        self.cursor = navigate(&self.results, self.cursor, Direction::Next);
        self.cursor
    }

    /// Step back; inert on the first match.
    pub fn previous(&mut self) -> usize {
        self.cursor = navigate(&self.results, self.cursor, Direction::Previous);
        self.cursor
    }

    /// Delete the record under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::NothingSelected` when there are no matches, or
    /// `BrowserError::Storage` if the store cannot be written.
    pub async fn delete_current(
        &mut self,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, BrowserError> {
        let id = self.current().ok_or(BrowserError::NothingSelected)?.id;
        self.delete(id, confirmation).await
    }

    /// Delete a record by id and refresh the view.
    ///
    /// # Errors
    ///
    /// Returns `BrowserError::Storage` if the store cannot be written.
    pub async fn delete(
        &mut self,
        id: RecordId,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, BrowserError> {
        let outcome = self.store.delete(id, confirmation).await?;
        if outcome == DeleteOutcome::Deleted {
            self.reload().await;
        }
        Ok(outcome)
    }

    fn apply_query(&mut self) {
        self.results = self
            .records
            .iter()
            .filter(|record| record.name_matches(&self.query))
            .cloned()
            .collect();
        self.cursor = self.cursor.min(self.results.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;
    use trivia_core::model::AnswerSet;

    async fn seeded(names: &[&str]) -> ResponseStore {
        let store = Storage::in_memory().responses();
        for (score, name) in names.iter().enumerate() {
            store
                .append(name, &AnswerSet::new(), u32::try_from(score).unwrap())
                .await
                .unwrap();
        }
        store
    }

    fn names(browser: &ResponseBrowser) -> Vec<&str> {
        browser.results().iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn opens_with_all_records() {
        let browser = ResponseBrowser::open(seeded(&["Ana", "Beto"]).await).await;
        assert_eq!(names(&browser), ["Ana", "Beto"]);
        assert_eq!(browser.current().unwrap().name, "Ana");
        assert!(!browser.has_previous());
        assert!(browser.has_next());
    }

    #[tokio::test]
    async fn navigation_is_clamped() {
        let mut browser = ResponseBrowser::open(seeded(&["Ana", "Beto", "Cata"]).await).await;
        assert_eq!(browser.previous(), 0);
        assert_eq!(browser.next(), 1);
        assert_eq!(browser.next(), 2);
        assert_eq!(browser.next(), 2);
        assert!(!browser.has_next());
    }

    #[tokio::test]
    async fn query_filters_and_resets_cursor() {
        let mut browser = ResponseBrowser::open(seeded(&["Ana", "Beto", "Mariana"]).await).await;
        browser.next();
        browser.set_query("ANA");
        assert_eq!(browser.cursor(), 0);
        assert_eq!(names(&browser), ["Ana", "Mariana"]);

        browser.set_query("zzz");
        assert!(browser.results().is_empty());
        assert!(browser.current().is_none());
        assert_eq!(browser.next(), 0);
        assert_eq!(browser.total(), 3);
    }

    #[tokio::test]
    async fn confirmed_delete_reloads_view() {
        let store = seeded(&["Ana", "Beto", "Cata"]).await;
        let mut browser = ResponseBrowser::open(store.clone()).await;
        browser.next();
        browser.next();

        let outcome = browser.delete_current(Confirmation::Confirmed).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(names(&browser), ["Ana", "Beto"]);
        assert_eq!(browser.cursor(), 1);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn declined_delete_keeps_record() {
        let store = seeded(&["Ana"]).await;
        let mut browser = ResponseBrowser::open(store.clone()).await;
        let outcome = browser.delete_current(Confirmation::Declined).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(names(&browser), ["Ana"]);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn delete_with_no_match_reports_nothing_selected() {
        let mut browser = ResponseBrowser::open(seeded(&[]).await).await;
        let err = browser
            .delete_current(Confirmation::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, BrowserError::NothingSelected));
    }

    #[tokio::test]
    async fn view_is_not_refreshed_implicitly() {
        let store = seeded(&["Ana"]).await;
        let mut browser = ResponseBrowser::open(store.clone()).await;
        store.append("Beto", &AnswerSet::new(), 0).await.unwrap();
        assert_eq!(browser.total(), 1);

        browser.reload().await;
        assert_eq!(browser.total(), 2);
    }
}
