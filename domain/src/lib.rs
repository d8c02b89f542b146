//! Domain layer for roundtable
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A chat session owns an append-only transcript of [`Message`]s together
//! with the settings used to produce it.
//!
//! ## Round Table
//!
//! - **Participants** take turns answering, each seeing the transcript so far
//! - **Chairman** closes every round with a summary
//! - **TurnPlan** fixes the order: `P1 .. PN, Chairman` per round

pub mod config;
pub mod core;
pub mod prompt;
pub mod providers;
pub mod roundtable;
pub mod session;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{
    error::{DomainError, validate_temperature},
    model::ModelSpec,
    provider::Provider,
    question::Question,
};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, PromptTemplate};
pub use providers::{
    AnthropicProviderConfig, OpenAiProviderConfig, OpenRouterProviderConfig, ProviderConfig,
};
pub use roundtable::{Participant, RoundTableConfig, Turn, TurnPlan};
pub use session::{
    entities::{ChatMode, ChatSettings, DEFAULT_TEMPERATURE, Message, MessageKind, Role, Session},
    transcript::{Exchange, PromptMessage},
};
