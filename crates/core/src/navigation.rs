/// Step direction when moving through a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Move `current` one step through `results` in `direction`, clamped to
/// `[0, results.len() - 1]`.
///
/// Never wraps; stepping past either end returns the boundary index.
/// An empty list always yields 0.
#[must_use]
pub fn navigate<T>(results: &[T], current: usize, direction: Direction) -> usize {
    let Some(last) = results.len().checked_sub(1) else {
        return 0;
    };
    let current = current.min(last);
    match direction {
        Direction::Previous => current.saturating_sub(1),
        Direction::Next => (current + 1).min(last),
    }
}
