//! Round table participants and configuration

use crate::core::error::{DomainError, validate_temperature};
use crate::core::model::ModelSpec;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One provider/model pair taking part in a round table (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name, unique within a round table
    pub name: String,
    pub model: ModelSpec,
    /// Replaces the session system prompt for this participant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Overrides the session temperature for this participant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Participant {
    pub fn new(name: impl Into<String>, model: ModelSpec) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyParticipantName);
        }
        Ok(Self {
            name,
            model,
            system_prompt: None,
            temperature: None,
        })
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, DomainError> {
        self.temperature = Some(validate_temperature(temperature)?);
        Ok(self)
    }
}

fn default_rounds() -> u32 {
    1
}

/// Round table setup: ordered participants, chairman, number of rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredRoundTable")]
pub struct RoundTableConfig {
    participants: Vec<Participant>,
    chairman: Option<ModelSpec>,
    rounds: u32,
}

impl Default for RoundTableConfig {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            chairman: None,
            rounds: default_rounds(),
        }
    }
}

impl RoundTableConfig {
    /// Participants in speaking order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn chairman(&self) -> Option<&ModelSpec> {
        self.chairman.as_ref()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Add a participant at the end of the speaking order
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        if self.participants.iter().any(|p| p.name == participant.name) {
            return Err(DomainError::DuplicateParticipant(participant.name));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant by name
    pub fn remove_participant(&mut self, name: &str) -> Result<Participant, DomainError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| DomainError::UnknownParticipant(name.to_string()))?;
        Ok(self.participants.remove(index))
    }

    pub fn set_chairman(&mut self, model: ModelSpec) {
        self.chairman = Some(model);
    }

    pub fn set_rounds(&mut self, rounds: u32) -> Result<(), DomainError> {
        if rounds == 0 {
            return Err(DomainError::InvalidRounds);
        }
        self.rounds = rounds;
        Ok(())
    }

    /// Remove all participants and the chairman
    pub fn clear(&mut self) {
        self.participants.clear();
        self.chairman = None;
    }

    /// Label attached to chairman summaries
    pub fn chairman_label(&self) -> Option<String> {
        self.chairman
            .as_ref()
            .map(|c| format!("Chairman ({})", c.model()))
    }

    /// Check that a run can start
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        if self.chairman.is_none() {
            return Err(DomainError::NoChairman);
        }
        if self.rounds == 0 {
            return Err(DomainError::InvalidRounds);
        }
        if let Some(label) = self.chairman_label()
            && self.participants.iter().any(|p| p.name == label)
        {
            return Err(DomainError::ReservedParticipantName(label));
        }
        Ok(())
    }
}

/// Round table as found in session files.
///
/// Older files carry `models` (name to `[provider, model]`, in speaking
/// order) and `chairman_model` instead of `participants` and `chairman`.
#[derive(Deserialize)]
struct StoredRoundTable {
    #[serde(default)]
    participants: Vec<Participant>,
    #[serde(default)]
    chairman: Option<ModelSpec>,
    #[serde(default = "default_rounds")]
    rounds: u32,
    #[serde(default, deserialize_with = "ordered_models")]
    models: Vec<(String, (String, String))>,
    #[serde(default)]
    chairman_model: Option<(String, String)>,
}

impl TryFrom<StoredRoundTable> for RoundTableConfig {
    type Error = DomainError;

    fn try_from(stored: StoredRoundTable) -> Result<Self, Self::Error> {
        if stored.rounds == 0 {
            return Err(DomainError::InvalidRounds);
        }
        let mut config = RoundTableConfig {
            participants: Vec::new(),
            chairman: stored.chairman,
            rounds: stored.rounds,
        };
        for participant in stored.participants {
            config.add_participant(participant)?;
        }
        if config.participants.is_empty() {
            for (name, (provider, model)) in stored.models {
                let model = ModelSpec::new(provider.parse()?, model)?;
                config.add_participant(Participant::new(name, model)?)?;
            }
        }
        if config.chairman.is_none()
            && let Some((provider, model)) = stored.chairman_model
        {
            config.chairman = Some(ModelSpec::new(provider.parse()?, model)?);
        }
        Ok(config)
    }
}

/// Read a JSON object into its entries, keeping document order
fn ordered_models<'de, D>(deserializer: D) -> Result<Vec<(String, (String, String))>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedModels;

    impl<'de> Visitor<'de> for OrderedModels {
        type Value = Vec<(String, (String, String))>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of participant name to [provider, model]")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedModels)
}
