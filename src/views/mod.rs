pub mod catalog;
pub mod confirmation;
pub mod dashboard;
pub mod notifications;

use serde::Serialize;

/// Outcome of a view's backend fetch. The reason for a failure travels in
/// the view's notices.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    Loaded(T),
    Failed,
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            LoadState::Failed => None,
        }
    }
}
