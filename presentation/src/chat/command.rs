//! Slash commands understood by the REPL

use roundtable_domain::{ChatMode, ModelSpec, Provider, validate_temperature};
use thiserror::Error;

/// Errors produced while parsing a slash command
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type /help for available commands)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{command}: {reason}")]
    Invalid {
        command: &'static str,
        reason: String,
    },
}

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Help,
    Mode(ChatMode),
    Model(ModelSpec),
    Models(Option<Provider>),
    Temperature(f32),
    Add {
        name: String,
        model: ModelSpec,
        temperature: Option<f32>,
    },
    Remove(String),
    Chairman(ModelSpec),
    Rounds(u32),
    Participants,
    Prompt(String),
    Prompts,
    System(String),
    Save(String),
    Load(String),
    Sessions,
    Show,
    Clear,
    Quit,
}

impl ReplCommand {
    /// Parse a line starting with `/`
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/help" | "/h" | "/?" => Ok(ReplCommand::Help),
            "/quit" | "/exit" | "/q" => Ok(ReplCommand::Quit),
            "/mode" => {
                let mode = required(rest, "/mode standard|roundtable")?
                    .parse::<ChatMode>()
                    .map_err(|reason| CommandError::Invalid {
                        command: "/mode",
                        reason,
                    })?;
                Ok(ReplCommand::Mode(mode))
            }
            "/model" => Ok(ReplCommand::Model(model_arg(
                "/model",
                required(rest, "/model <provider:model>")?,
            )?)),
            "/models" => {
                if rest.is_empty() {
                    return Ok(ReplCommand::Models(None));
                }
                let provider = rest.parse::<Provider>().map_err(|e: roundtable_domain::DomainError| {
                    CommandError::Invalid {
                        command: "/models",
                        reason: e.to_string(),
                    }
                })?;
                Ok(ReplCommand::Models(Some(provider)))
            }
            "/temp" | "/temperature" => Ok(ReplCommand::Temperature(temperature_arg(
                "/temp",
                required(rest, "/temp <0.0-2.0>")?,
            )?)),
            "/add" => {
                let usage = "/add <name> <provider:model> [temperature]";
                let mut args = rest.split_whitespace();
                let (Some(name), Some(model)) = (args.next(), args.next()) else {
                    return Err(CommandError::Usage(usage));
                };
                let temperature = args
                    .next()
                    .map(|t| temperature_arg("/add", t))
                    .transpose()?;
                if args.next().is_some() {
                    return Err(CommandError::Usage(usage));
                }
                Ok(ReplCommand::Add {
                    name: name.to_string(),
                    model: model_arg("/add", model)?,
                    temperature,
                })
            }
            "/remove" => Ok(ReplCommand::Remove(
                required(rest, "/remove <name>")?.to_string(),
            )),
            "/chairman" => Ok(ReplCommand::Chairman(model_arg(
                "/chairman",
                required(rest, "/chairman <provider:model>")?,
            )?)),
            "/rounds" => {
                let rounds: u32 = required(rest, "/rounds <n>")?.parse().map_err(|_| {
                    CommandError::Invalid {
                        command: "/rounds",
                        reason: format!("'{}' is not a whole number", rest),
                    }
                })?;
                if rounds == 0 {
                    return Err(CommandError::Invalid {
                        command: "/rounds",
                        reason: "must be at least 1".to_string(),
                    });
                }
                Ok(ReplCommand::Rounds(rounds))
            }
            "/participants" => Ok(ReplCommand::Participants),
            "/prompt" => Ok(ReplCommand::Prompt(
                required(rest, "/prompt <name>")?.to_string(),
            )),
            "/prompts" => Ok(ReplCommand::Prompts),
            "/system" => Ok(ReplCommand::System(
                required(rest, "/system <text>")?.to_string(),
            )),
            "/save" => Ok(ReplCommand::Save(required(rest, "/save <name>")?.to_string())),
            "/load" => Ok(ReplCommand::Load(required(rest, "/load <name>")?.to_string())),
            "/sessions" => Ok(ReplCommand::Sessions),
            "/show" => Ok(ReplCommand::Show),
            "/clear" => Ok(ReplCommand::Clear),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Help text listing every command
    pub fn help() -> &'static str {
        "Commands:
  /help                              Show this help
  /mode standard|roundtable          Switch chat mode (starts a new conversation)
  /model <provider:model>            Model for standard mode
  /models [provider]                 List known models
  /temp <value>                      Temperature (0.0 - 2.0)
  /add <name> <provider:model> [t]   Add a round table participant
  /remove <name>                     Remove a participant
  /chairman <provider:model>         Set the chairman
  /rounds <n>                        Rounds per round table run
  /participants                      Show the round table setup
  /prompt <name>                     Load a system prompt
  /prompts                           List saved prompts
  /system <text>                     Set the system prompt
  /save <name>                       Save the session
  /load <name>                       Load a saved session
  /sessions                          List saved sessions
  /show                              Show the whole transcript
  /clear                             Start over (keeps the system prompt)
  /quit                              Exit"
    }
}

fn required<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest)
    }
}

fn model_arg(command: &'static str, value: &str) -> Result<ModelSpec, CommandError> {
    value.parse().map_err(|e: roundtable_domain::DomainError| CommandError::Invalid {
        command,
        reason: e.to_string(),
    })
}

fn temperature_arg(command: &'static str, value: &str) -> Result<f32, CommandError> {
    let parsed: f32 = value.parse().map_err(|_| CommandError::Invalid {
        command,
        reason: format!("'{}' is not a number", value),
    })?;
    validate_temperature(parsed).map_err(|e| CommandError::Invalid {
        command,
        reason: e.to_string(),
    })
}
