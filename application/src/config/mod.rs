//! Application-level configuration.
//!
//! [`ChatDefaults`] carries the settings a new session starts from and
//! the auto-save policy. The infrastructure layer builds it from the
//! merged configuration files.

mod chat_defaults;

pub use chat_defaults::ChatDefaults;
