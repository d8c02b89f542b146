//! Session persistence use case
//!
//! Explicit save/load/list plus the auto-save policy.

use crate::ports::session_store::{SessionEntry, SessionStore, SessionStoreError};
use chrono::{DateTime, Local};
use roundtable_domain::Session;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// History length above which a session is auto-saved
pub const DEFAULT_AUTOSAVE_MIN_MESSAGES: usize = 4;

/// Save, load and auto-save sessions through a [`SessionStore`]
pub struct SessionPersistence {
    store: Arc<dyn SessionStore>,
    autosave_min_messages: usize,
}

impl SessionPersistence {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            autosave_min_messages: DEFAULT_AUTOSAVE_MIN_MESSAGES,
        }
    }

    pub fn with_autosave_min_messages(mut self, min: usize) -> Self {
        self.autosave_min_messages = min;
        self
    }

    /// Save the session under `name`, returning the stored file name.
    ///
    /// An empty session is refused.
    pub fn save(&self, session: &Session, name: &str) -> Result<String, SessionStoreError> {
        if session.is_empty() {
            return Err(SessionStoreError::NothingToSave);
        }
        let stored = self.store.save(session, name)?;
        info!("Session saved as {}", stored);
        Ok(stored)
    }

    /// Load a session. The caller keeps its current session on error.
    pub fn load(&self, name: &str) -> Result<Session, SessionStoreError> {
        let session = self.store.load(name)?;
        if session.is_empty() {
            return Err(SessionStoreError::EmptySession(name.to_string()));
        }
        if !session.is_well_formed() {
            warn!("Session {} does not start with a user message", name);
        }
        debug!("Loaded session {} ({} messages)", name, session.len());
        Ok(session)
    }

    pub fn list(&self) -> Result<Vec<SessionEntry>, SessionStoreError> {
        self.store.list()
    }

    /// Auto-save after a successful exchange.
    ///
    /// Returns the file name when a save happened. Failures are logged and
    /// swallowed.
    pub fn autosave(&self, session: &Session) -> Option<String> {
        self.autosave_at(session, Local::now())
    }

    fn autosave_at(&self, session: &Session, now: DateTime<Local>) -> Option<String> {
        if session.len() <= self.autosave_min_messages {
            return None;
        }
        let name = autosave_name(now);
        match self.store.save(session, &name) {
            Ok(stored) => {
                debug!("Auto-saved session as {}", stored);
                Some(stored)
            }
            Err(e) => {
                warn!("Auto-save failed: {}", e);
                None
            }
        }
    }
}

/// `autosave_<YYYYmmdd_HHMMSS>.json`
pub fn autosave_name(now: DateTime<Local>) -> String {
    format!("autosave_{}.json", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use roundtable_domain::Message;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        sessions: Mutex<HashMap<String, Session>>,
        fail: bool,
    }

    impl SessionStore for MemoryStore {
        fn save(&self, session: &Session, name: &str) -> Result<String, SessionStoreError> {
            if self.fail {
                return Err(SessionStoreError::Io {
                    name: name.to_string(),
                    reason: "disk full".to_string(),
                });
            }
            self.sessions
                .lock()
                .unwrap()
                .insert(name.to_string(), session.clone());
            Ok(name.to_string())
        }

        fn load(&self, name: &str) -> Result<Session, SessionStoreError> {
            self.sessions
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .ok_or_else(|| SessionStoreError::NotFound(name.to_string()))
        }

        fn list(&self) -> Result<Vec<SessionEntry>, SessionStoreError> {
            Ok(Vec::new())
        }
    }

    fn session_with(messages: usize) -> Session {
        let mut session = Session::new("");
        for i in 0..messages {
            let message = if i % 2 == 0 {
                Message::user(format!("q{}", i))
            } else {
                Message::assistant(format!("a{}", i))
            };
            session.push(message).unwrap();
        }
        session
    }

    #[test]
    fn test_save_refuses_empty_session() {
        let persistence = SessionPersistence::new(Arc::new(MemoryStore::default()));
        let err = persistence.save(&Session::new(""), "x").unwrap_err();
        assert_eq!(err, SessionStoreError::NothingToSave);
        assert_eq!(err.to_string(), "Nothing to save - session is empty");
    }

    #[test]
    fn test_save_then_load() {
        let persistence = SessionPersistence::new(Arc::new(MemoryStore::default()));
        let session = session_with(2);
        let name = persistence.save(&session, "chat").unwrap();
        let loaded = persistence.load(&name).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_load_rejects_empty_history() {
        let store = Arc::new(MemoryStore::default());
        store
            .sessions
            .lock()
            .unwrap()
            .insert("empty".to_string(), Session::new(""));
        let persistence = SessionPersistence::new(store);
        assert!(matches!(
            persistence.load("empty"),
            Err(SessionStoreError::EmptySession(_))
        ));
    }

    #[test]
    fn test_autosave_threshold() {
        let store = Arc::new(MemoryStore::default());
        let persistence = SessionPersistence::new(store.clone());
        let now = Local.with_ymd_and_hms(2025, 3, 1, 14, 5, 9).unwrap();

        assert_eq!(persistence.autosave_at(&session_with(4), now), None);
        assert_eq!(
            persistence.autosave_at(&session_with(5), now),
            Some("autosave_20250301_140509.json".to_string())
        );
        assert_eq!(store.sessions.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_autosave_failure_is_swallowed() {
        let store = Arc::new(MemoryStore {
            fail: true,
            ..Default::default()
        });
        let persistence = SessionPersistence::new(store).with_autosave_min_messages(0);
        assert_eq!(persistence.autosave(&session_with(1)), None);
    }
}
