//! Chat session domain.
//!
//! - [`entities::Session`]: metadata plus an append-only transcript
//! - [`entities::Message`]: a single, immutable transcript entry
//! - [`transcript`]: per-speaker views of the transcript for outbound calls

pub mod entities;
pub mod transcript;
