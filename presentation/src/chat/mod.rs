//! Interactive chat module
//!
//! Provides a line-editor based interactive chat interface for roundtable.

mod command;
mod repl;

pub use command::{CommandError, ReplCommand};
pub use repl::ChatRepl;
