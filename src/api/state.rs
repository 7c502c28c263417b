//! Shared server state: the user store, in-flight registrations and the
//! sessions handed out to browsers.
//!
//! Locks are always taken in the order registrations → store → sessions.

use crate::auth::{RegistrationWizard, Session, UserStore};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;
use tracing::debug;
use ulid::Ulid;

/// Unverified registrations held at once; the oldest is dropped beyond this.
pub const MAX_PENDING_REGISTRATIONS: usize = 1024;

pub struct AppState {
    store: Mutex<Box<dyn UserStore>>,
    // ULID keys sort by creation time, so the first entry is the oldest.
    registrations: Mutex<BTreeMap<Ulid, RegistrationWizard>>,
    registration_limit: usize,
    sessions: SessionRegistry,
}

impl AppState {
    pub fn new(store: impl UserStore + 'static) -> Self {
        Self::with_registration_limit(store, MAX_PENDING_REGISTRATIONS)
    }

    /// A `limit` of zero is treated as one.
    pub fn with_registration_limit(store: impl UserStore + 'static, limit: usize) -> Self {
        Self {
            store: Mutex::new(Box::new(store)),
            registrations: Mutex::new(BTreeMap::new()),
            registration_limit: limit.max(1),
            sessions: SessionRegistry::default(),
        }
    }

    pub(crate) fn store(&self) -> &Mutex<Box<dyn UserStore>> {
        &self.store
    }

    pub(crate) fn registrations(&self) -> &Mutex<BTreeMap<Ulid, RegistrationWizard>> {
        &self.registrations
    }

    /// Keep `wizard` under a new id, evicting the oldest entries at the limit.
    pub(crate) async fn start_registration(&self, wizard: RegistrationWizard) -> Ulid {
        let id = Ulid::new();
        let mut registrations = self.registrations.lock().await;
        while registrations.len() >= self.registration_limit {
            let Some((evicted, _)) = registrations.pop_first() else {
                break;
            };
            debug!(registration_id = %evicted, "pending registration evicted");
        }
        registrations.insert(id, wizard);
        id
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

/// Bearer token → session. Tokens are ULIDs and only identify a browser,
/// they carry no authority of their own.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub async fn insert(&self, session: Session) -> String {
        let token = Ulid::new().to_string();
        self.sessions.lock().await.insert(token.clone(), session);
        token
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.lock().await.get(token).cloned()
    }

    pub async fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.lock().await.remove(token)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryUserStore, Role};

    fn session() -> Session {
        Session {
            name: "Ravi".to_string(),
            email: "r@x.com".to_string(),
            phone: "1".to_string(),
            identifier: "111122223333".to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn registry_round_trip() {
        let registry = SessionRegistry::default();
        let token = registry.insert(session()).await;
        assert!(Ulid::from_string(&token).is_ok());
        assert_eq!(registry.get(&token).await.map(|s| s.role), Some(Role::Admin));

        assert!(registry.remove(&token).await.is_some());
        assert!(registry.get(&token).await.is_none());
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn tokens_are_distinct() {
        let registry = SessionRegistry::default();
        let a = registry.insert(session()).await;
        let b = registry.insert(session()).await;
        assert_ne!(a, b);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn pending_registrations_stay_at_the_limit() {
        let state = AppState::with_registration_limit(MemoryUserStore::new(), 3);
        let mut last = None;
        for _ in 0..10 {
            last = Some(state.start_registration(RegistrationWizard::new()).await);
        }

        let registrations = state.registrations().lock().await;
        assert_eq!(registrations.len(), 3);
        assert!(last.is_some_and(|id| registrations.contains_key(&id)));
    }

    #[tokio::test]
    async fn oldest_registration_is_evicted_first() {
        let state = AppState::with_registration_limit(MemoryUserStore::new(), 2);
        let first = state.start_registration(RegistrationWizard::new()).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = state.start_registration(RegistrationWizard::new()).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let third = state.start_registration(RegistrationWizard::new()).await;

        let registrations = state.registrations().lock().await;
        assert!(!registrations.contains_key(&first));
        assert!(registrations.contains_key(&second));
        assert!(registrations.contains_key(&third));
    }

    #[tokio::test]
    async fn zero_limit_still_keeps_the_newest() {
        let state = AppState::with_registration_limit(MemoryUserStore::new(), 0);
        let id = state.start_registration(RegistrationWizard::new()).await;
        let registrations = state.registrations().lock().await;
        assert_eq!(registrations.len(), 1);
        assert!(registrations.contains_key(&id));
    }

    #[tokio::test]
    async fn state_starts_empty() -> anyhow::Result<()> {
        let state = AppState::new(MemoryUserStore::new());
        assert!(state.store().lock().await.list_users()?.is_empty());
        assert!(state.registrations().lock().await.is_empty());
        Ok(())
    }
}
