//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::Provider`]: the closed set of hosted LLM providers
//! - [`model::ModelSpec`]: a provider plus a model identifier
//! - [`question::Question`]: a validated user query
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod provider;
pub mod question;
pub mod string;
