//! Session store port
//!
//! Persists whole sessions under a file name inside one directory.

use roundtable_domain::Session;
use thiserror::Error;

/// Errors that can occur while saving or loading sessions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionStoreError {
    #[error("Nothing to save - session is empty")]
    NothingToSave,

    #[error("Invalid session name: {0:?}")]
    InvalidName(String),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session file is empty or invalid: {0}")]
    EmptySession(String),

    #[error("Malformed session file {name}: {reason}")]
    Malformed { name: String, reason: String },

    #[error("I/O error on {name}: {reason}")]
    Io { name: String, reason: String },
}

/// A saved session as listed by the store
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    /// File name, including the `.json` extension
    pub name: String,
    /// Last modification time
    pub modified: chrono::DateTime<chrono::Utc>,
}

/// Storage for complete sessions
///
/// Names are plain file names. A missing `.json` extension is appended by
/// the implementation; path separators are rejected.
pub trait SessionStore: Send + Sync {
    /// Save the whole session, returning the normalized file name
    fn save(&self, session: &Session, name: &str) -> Result<String, SessionStoreError>;

    /// Load a session by file name
    fn load(&self, name: &str) -> Result<Session, SessionStoreError>;

    /// List saved sessions, newest first
    fn list(&self) -> Result<Vec<SessionEntry>, SessionStoreError>;
}
