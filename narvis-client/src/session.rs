//! Browser-scoped holder of the current session token.
//!
//! The store is an explicit value handed to whatever needs authentication. It persists through a
//! [TokenStorage] backend (browser `localStorage` in production) so a returning user with a live
//! token does not have to log in again. Each stored entry carries its issue and expiry time and
//! [SessionStore::get] treats an expired entry as absent.

use std::{fmt, rc::Rc};

use chrono::{DateTime, Utc};
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Name of the single `localStorage` slot holding the session
pub const SESSION_KEY: &str = "narvis_session";

/// Opaque credential issued by the token endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    /// Value of the `Authorization` header for requests made with this token
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Entry persisted in storage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: SessionToken,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Durable slot for at most one [StoredSession]
pub trait TokenStorage {
    /// Current entry, `None` when the slot is empty or unreadable
    fn read(&self) -> Option<StoredSession>;
    /// Replace the entry
    /// # Errors
    /// Fails when the backing storage refuses the write
    fn write(&self, session: &StoredSession) -> Result<()>;
    fn remove(&self);
}

/// [TokenStorage] backed by the browser's `localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl TokenStorage for BrowserStorage {
    fn read(&self) -> Option<StoredSession> {
        match LocalStorage::get::<StoredSession>(SESSION_KEY) {
            Ok(session) => Some(session),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => None,
            Err(error) => {
                log::warn!("Discarding unreadable session entry. {error}");
                LocalStorage::delete(SESSION_KEY);
                None
            }
        }
    }

    fn write(&self, session: &StoredSession) -> Result<()> {
        LocalStorage::set(SESSION_KEY, session)?;
        Ok(())
    }

    fn remove(&self) {
        LocalStorage::delete(SESSION_KEY);
    }
}

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Handle to the session slot. Clones share the same storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn TokenStorage>,
    clock: Rc<dyn Clock>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn TokenStorage>, clock: Rc<dyn Clock>, ttl: chrono::Duration) -> Self {
        Self {
            storage,
            clock,
            ttl,
        }
    }

    /// Store backed by `localStorage` and the system clock
    pub fn browser(ttl: chrono::Duration) -> Self {
        Self::new(Rc::new(BrowserStorage), Rc::new(SystemClock), ttl)
    }

    /// Replace whatever token is stored with `token`, valid for the configured lifetime
    /// # Errors
    /// Fails when the expiry cannot be represented or the storage backend refuses the write
    pub fn set(&self, token: SessionToken) -> Result<()> {
        let issued_at = self.clock.now();
        let Some(expires_at) = issued_at.checked_add_signed(self.ttl) else {
            log::error!("Session lifetime of {} cannot be applied to {issued_at}", self.ttl);
            return Err(ClientError::Storage(
                "The session lifetime is out of range".to_owned(),
            ));
        };
        let session = StoredSession {
            token,
            issued_at,
            expires_at,
        };
        self.storage.write(&session)?;
        log::debug!("Session stored, expires at {}", session.expires_at);
        Ok(())
    }

    /// The live token, if any. An expired entry is removed and reported as absent.
    pub fn get(&self) -> Option<SessionToken> {
        let session = self.storage.read()?;
        if session.is_expired(self.clock.now()) {
            log::info!("Session expired at {}", session.expires_at);
            self.storage.remove();
            return None;
        }
        Some(session.token)
    }

    pub fn is_active(&self) -> bool {
        self.get().is_some()
    }

    /// Forget the stored token
    pub fn clear(&self) {
        self.storage.remove();
        log::debug!("Session cleared");
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use chrono::{DateTime, TimeZone, Utc};

    use super::{Clock, SessionStore, StoredSession, TokenStorage};
    use crate::error::Result;

    /// [TokenStorage] that lives only as long as the value itself
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStorage {
        slot: RefCell<Option<StoredSession>>,
    }

    impl TokenStorage for MemoryStorage {
        fn read(&self) -> Option<StoredSession> {
            self.slot.borrow().clone()
        }

        fn write(&self, session: &StoredSession) -> Result<()> {
            *self.slot.borrow_mut() = Some(session.clone());
            Ok(())
        }

        fn remove(&self) {
            self.slot.borrow_mut().take();
        }
    }

    /// Clock that only moves when told to
    pub(crate) struct FixedClock(pub(crate) Cell<DateTime<Utc>>);

    impl FixedClock {
        pub(crate) fn advance(&self, by: chrono::Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }

    pub(crate) fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid start time")
    }

    /// In-memory store with a one day lifetime and a controllable clock
    pub(crate) fn memory_session() -> (SessionStore, Rc<FixedClock>) {
        memory_session_with_ttl(chrono::Duration::days(1))
    }

    pub(crate) fn memory_session_with_ttl(ttl: chrono::Duration) -> (SessionStore, Rc<FixedClock>) {
        let clock = Rc::new(FixedClock(Cell::new(start_time())));
        let store = SessionStore::new(Rc::new(MemoryStorage::default()), clock.clone(), ttl);
        (store, clock)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{
        fixtures::{memory_session, memory_session_with_ttl},
        SessionToken,
    };
    use crate::error::ClientError;

    #[test]
    fn get_should_return_last_token_set() {
        let (store, _) = memory_session();

        store.set(SessionToken::new("first")).expect("set first");
        store.set(SessionToken::new("second")).expect("set second");

        assert_eq!(store.get(), Some(SessionToken::new("second")), "token is overwritten");
    }

    #[test]
    fn get_should_be_absent_before_any_login() {
        let (store, _) = memory_session();
        assert_eq!(store.get(), None, "nothing stored yet");
    }

    #[test]
    fn clear_should_remove_token() {
        let (store, _) = memory_session();
        store.set(SessionToken::new("abc")).expect("set");

        store.clear();

        assert_eq!(store.get(), None, "token cleared");
        assert!(!store.is_active(), "store inactive after clear");
    }

    #[rstest]
    #[case::fresh(chrono::Duration::hours(1), true)]
    #[case::last_second(chrono::Duration::hours(24) - chrono::Duration::seconds(1), true)]
    #[case::at_expiry(chrono::Duration::hours(24), false)]
    #[case::long_gone(chrono::Duration::days(30), false)]
    fn get_should_respect_expiry(#[case] elapsed: chrono::Duration, #[case] live: bool) {
        let (store, clock) = memory_session();
        store.set(SessionToken::new("abc")).expect("set");

        clock.advance(elapsed);

        assert_eq!(store.get().is_some(), live, "token live after {elapsed}");
    }

    #[test]
    fn expired_entry_is_dropped_from_storage() {
        let (store, clock) = memory_session();
        store.set(SessionToken::new("abc")).expect("set");
        clock.advance(chrono::Duration::days(2));
        assert_eq!(store.get(), None, "expired");

        clock.0.set(super::fixtures::start_time());

        assert_eq!(store.get(), None, "expired entry was removed, not just hidden");
    }

    #[test]
    fn set_should_fail_when_expiry_overflows() {
        let (store, _) = memory_session_with_ttl(chrono::Duration::days(100_000_000_000));

        let result = store.set(SessionToken::new("abc"));

        assert!(
            matches!(result, Err(ClientError::Storage(_))),
            "unrepresentable expiry is an error, got {result:?}"
        );
        assert_eq!(store.get(), None, "nothing stored");
    }

    #[test]
    fn clones_share_the_same_slot() {
        let (store, _) = memory_session();
        let other = store.clone();

        store.set(SessionToken::new("shared")).expect("set");

        assert_eq!(other.get(), Some(SessionToken::new("shared")), "clone sees token");
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret");
        assert_eq!(format!("{token:?}"), "SessionToken(***)", "debug output");
        assert_eq!(token.bearer(), "Bearer secret", "bearer header");
    }
}
