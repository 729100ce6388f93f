use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::api::BookingApi;
use crate::config::AppConfig;
use crate::wizard::BookingWizard;

pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<dyn BookingApi>,
    pub wizards: WizardStore,
}

impl AppState {
    pub fn new(config: AppConfig, api: Arc<dyn BookingApi>) -> Self {
        let wizards = WizardStore::new(config.wizard_idle);
        Self {
            config,
            api,
            wizards,
        }
    }
}

struct WizardSession {
    wizard: BookingWizard,
    touched: Instant,
}

/// In-progress wizards keyed by session id. The lock is only ever held for
/// synchronous wizard updates, never across a backend call.
pub struct WizardStore {
    sessions: Mutex<HashMap<Uuid, WizardSession>>,
    idle: Duration,
}

impl WizardStore {
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle,
        }
    }

    /// Stores a new wizard and evicts sessions idle for longer than the limit.
    pub fn insert(&self, id: Uuid, wizard: BookingWizard) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, s| s.touched.elapsed() <= self.idle);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted idle wizard sessions");
        }
        sessions.insert(
            id,
            WizardSession {
                wizard,
                touched: Instant::now(),
            },
        );
    }

    /// Runs `f` against the wizard, or returns `None` if the session is gone.
    pub fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut BookingWizard) -> R) -> Option<R> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let session = sessions.get_mut(&id)?;
        session.touched = Instant::now();
        Some(f(&mut session.wizard))
    }

    pub fn remove(&self, id: Uuid) -> Option<BookingWizard> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|s| s.wizard)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{DateWindow, WizardStep};
    use chrono::NaiveDate;

    fn wizard() -> BookingWizard {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        BookingWizard::new(Some("s1".to_string()), DateWindow::from_today(today, 60))
    }

    #[test]
    fn test_with_and_remove() {
        let store = WizardStore::new(Duration::from_secs(60));
        let id = Uuid::new_v4();
        store.insert(id, wizard());

        let step = store.with(id, |w| w.advance()).unwrap();
        assert_eq!(step, Ok(WizardStep::ScheduleSelection));
        assert!(store.with(Uuid::new_v4(), |w| w.step()).is_none());

        assert!(store.remove(id).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_sessions_evicted_on_insert() {
        let store = WizardStore::new(Duration::ZERO);
        let stale = Uuid::new_v4();
        store.insert(stale, wizard());
        std::thread::sleep(Duration::from_millis(5));

        store.insert(Uuid::new_v4(), wizard());
        assert_eq!(store.len(), 1);
        assert!(store.with(stale, |w| w.step()).is_none());
    }
}
