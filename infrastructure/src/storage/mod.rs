//! File-backed stores for sessions and prompts.

mod json_session_store;
mod prompt_store;

pub use json_session_store::JsonSessionStore;
pub use prompt_store::FilePromptStore;

/// Reject names that would escape the store directory.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
