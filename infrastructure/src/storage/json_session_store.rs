//! JSON file per session.

use super::is_plain_file_name;
use chrono::{DateTime, Utc};
use roundtable_application::{SessionEntry, SessionStore, SessionStoreError};
use roundtable_domain::Session;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores each session as a pretty-printed JSON file in one directory.
///
/// Writes go to a temporary sibling first and are renamed into place.
pub struct JsonSessionStore {
    dir: PathBuf,
}

impl JsonSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `name` with a `.json` extension
    fn file_name(name: &str) -> Result<String, SessionStoreError> {
        let name = name.trim();
        if !is_plain_file_name(name) {
            return Err(SessionStoreError::InvalidName(name.to_string()));
        }
        if name.to_ascii_lowercase().ends_with(".json") {
            Ok(name.to_string())
        } else {
            Ok(format!("{}.json", name))
        }
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(contents)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }
}

fn io_error(name: &str, err: io::Error) -> SessionStoreError {
    SessionStoreError::Io {
        name: name.to_string(),
        reason: err.to_string(),
    }
}

impl SessionStore for JsonSessionStore {
    fn save(&self, session: &Session, name: &str) -> Result<String, SessionStoreError> {
        let file_name = Self::file_name(name)?;
        let path = self.dir.join(&file_name);

        let json = serde_json::to_vec_pretty(session).map_err(|e| SessionStoreError::Malformed {
            name: file_name.clone(),
            reason: e.to_string(),
        })?;
        self.write_atomic(&path, &json)
            .map_err(|e| io_error(&file_name, e))?;

        debug!("Wrote {} ({} bytes)", path.display(), json.len());
        Ok(file_name)
    }

    fn load(&self, name: &str) -> Result<Session, SessionStoreError> {
        let file_name = Self::file_name(name)?;
        let path = self.dir.join(&file_name);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SessionStoreError::NotFound(file_name));
            }
            Err(e) => return Err(io_error(&file_name, e)),
        };

        if contents.trim().is_empty() {
            return Err(SessionStoreError::EmptySession(file_name));
        }

        serde_json::from_str(&contents).map_err(|e| SessionStoreError::Malformed {
            name: file_name,
            reason: e.to_string(),
        })
    }

    fn list(&self) -> Result<Vec<SessionEntry>, SessionStoreError> {
        let dir_name = self.dir.display().to_string();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&dir_name, e)),
        };

        let mut sessions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&dir_name, e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.to_ascii_lowercase().ends_with(".json") {
                continue;
            }
            let metadata = entry.metadata().map_err(|e| io_error(&name, e))?;
            if !metadata.is_file() {
                continue;
            }
            let modified: DateTime<Utc> = metadata
                .modified()
                .map(DateTime::from)
                .unwrap_or_else(|_| Utc::now());
            sessions.push(SessionEntry { name, modified });
        }

        sessions.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
        Ok(sessions)
    }
}
