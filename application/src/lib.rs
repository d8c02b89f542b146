//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatDefaults;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    prompt_store::{PromptStore, PromptStoreError},
    session_store::{SessionEntry, SessionStore, SessionStoreError},
};
pub use use_cases::persist_session::{SessionPersistence, autosave_name};
pub use use_cases::run_round_table::{
    RoundTableError, RoundTableReport, RunRoundTableUseCase, TurnOutcome, TurnRecord,
};
pub use use_cases::send_message::{SendMessageError, SendMessageUseCase};
