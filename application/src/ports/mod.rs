//! Port definitions
//!
//! Ports are interfaces that define how the application layer
//! interacts with external systems (infrastructure).

pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
pub mod prompt_store;
pub mod session_store;
