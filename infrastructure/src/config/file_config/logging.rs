//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write a JSONL conversation log
    pub conversation_log: bool,
    /// Also write tracing output to a daily-rolling file
    pub file_log: bool,
    /// Directory for both logs; defaults to the platform data dir
    pub log_dir: Option<String>,
}

impl FileLoggingConfig {
    /// `log_dir`, or `<data_dir>/roundtable/logs`
    pub fn resolved_log_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("roundtable")
                .join("logs"),
        }
    }
}
