//! Prompt files in a directory.
//!
//! `.json` files hold `{"prompt": "..."}`; `.txt`, `.md` and files without
//! an extension are used verbatim.

use super::is_plain_file_name;
use roundtable_application::{PromptStore, PromptStoreError};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EXTENSIONS: [&str; 3] = ["json", "txt", "md"];

#[derive(Deserialize)]
struct PromptFile {
    prompt: String,
}

pub struct FilePromptStore {
    dir: PathBuf,
}

impl FilePromptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Exact file first, then `<name>.json`, `<name>.txt`, `<name>.md`.
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let exact = self.dir.join(name);
        if exact.is_file() {
            return Some(exact);
        }
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
    }

    fn parse(name: &str, path: &Path, contents: String) -> Result<String, PromptStoreError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let prompt = if is_json {
            serde_json::from_str::<PromptFile>(&contents)
                .map_err(|e| PromptStoreError::Invalid {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?
                .prompt
        } else {
            contents
        };

        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(PromptStoreError::Invalid {
                name: name.to_string(),
                reason: "prompt is empty".to_string(),
            });
        }
        Ok(prompt)
    }
}

impl PromptStore for FilePromptStore {
    fn load(&self, name: &str) -> Result<String, PromptStoreError> {
        let name = name.trim();
        if !is_plain_file_name(name) {
            return Err(PromptStoreError::InvalidName(name.to_string()));
        }
        let path = self
            .locate(name)
            .ok_or_else(|| PromptStoreError::NotFound(name.to_string()))?;

        let contents = fs::read_to_string(&path).map_err(|e| PromptStoreError::Io {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(name, &path, contents)
    }

    fn list(&self) -> Result<Vec<String>, PromptStoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PromptStoreError::Io {
                    name: self.dir.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| {
                let path = Path::new(name);
                !name.starts_with('.')
                    && match path.extension().and_then(|e| e.to_str()) {
                        Some(ext) => EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
                        None => true,
                    }
            })
            .collect();
        names.sort();
        Ok(names)
    }
}
