//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid model spec '{0}' (expected provider:model)")]
    InvalidModelSpec(String),

    #[error("Message content cannot be empty")]
    EmptyMessage,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Participant name cannot be empty")]
    EmptyParticipantName,

    #[error("Participant '{0}' already exists")]
    DuplicateParticipant(String),

    #[error("No participant named '{0}'")]
    UnknownParticipant(String),

    #[error("No participants configured for the round table")]
    NoParticipants,

    #[error("No chairman selected for the round table")]
    NoChairman,

    #[error("Participant name '{0}' is reserved for the chairman")]
    ReservedParticipantName(String),

    #[error("Round count must be at least 1")]
    InvalidRounds,

    #[error("Temperature {0} is outside 0.0..=2.0")]
    InvalidTemperature(f32),
}

/// Validate a sampling temperature
pub fn validate_temperature(temperature: f32) -> Result<f32, DomainError> {
    if (0.0..=2.0).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(DomainError::InvalidTemperature(temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::InvalidModelSpec("gpt-4o".to_string()).to_string(),
            "Invalid model spec 'gpt-4o' (expected provider:model)"
        );
        assert_eq!(
            DomainError::DuplicateParticipant("A".to_string()).to_string(),
            "Participant 'A' already exists"
        );
    }

    #[test]
    fn test_validate_temperature() {
        assert_eq!(validate_temperature(0.7), Ok(0.7));
        assert_eq!(validate_temperature(2.0), Ok(2.0));
        assert!(validate_temperature(-0.1).is_err());
        assert!(validate_temperature(2.5).is_err());
        assert!(validate_temperature(f32::NAN).is_err());
    }
}
