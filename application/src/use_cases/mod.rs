//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod persist_session;
pub mod run_round_table;
pub mod send_message;

#[cfg(test)]
pub(crate) mod test_support;
