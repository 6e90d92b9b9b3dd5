use crate::client::ClientError;

/// Remote
///
/// Lifecycle of a list-backed page section. The original site rendered a
/// fetch failure and an empty result identically; here they are distinct so
/// an error state can show a retry affordance while an empty level shows the
/// empty-state illustration.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    /// Request in flight; render the loading placeholder. Only the section
    /// awaiting the result suspends, the rest of the page stays interactive.
    Loading,
    Ready(Vec<T>),
    Empty,
    /// Fetch failed; render the error state with a retry affordance.
    Failed,
}

impl<T> Remote<T> {
    /// Fold a completed fetch into the section state.
    pub fn from_list(result: Result<Vec<T>, ClientError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Remote::Empty,
            Ok(items) => Remote::Ready(items),
            Err(_) => Remote::Failed,
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, Remote::Failed)
    }

    pub fn items(&self) -> &[T] {
        match self {
            Remote::Ready(items) => items,
            _ => &[],
        }
    }
}
