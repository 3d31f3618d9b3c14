/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    /// Zero-based index of the question on screen.
    pub index: usize,
    pub total: usize,
    pub answered: usize,
    pub is_last: bool,
}

impl QuizProgress {
    /// One-based position for display ("3 / 6").
    #[must_use]
    pub fn position(&self) -> usize {
        self.index + 1
    }
}
