use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::RepoState;

use super::{actions::Action, reducer::reduce};

/// Shared handle to the current [`RepoState`].
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Mutex<RepoState>>,
}

impl AppStore {
    pub fn new(state: RepoState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn state(&self) -> RepoState {
        self.lock().clone()
    }

    /// Replace the current state with `reduce(current, action)`.
    pub fn apply(&self, action: &Action) {
        let mut guard = self.lock();
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, action);
    }

    fn lock(&self) -> MutexGuard<'_, RepoState> {
        // reduce() never panics, so a poisoned lock still guards a whole state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
