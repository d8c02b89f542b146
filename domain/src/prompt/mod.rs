//! Prompt templates.

pub mod template;

pub use template::{DEFAULT_SYSTEM_PROMPT, PromptTemplate};
