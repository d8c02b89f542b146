//! CLI command definitions

use clap::{Parser, ValueEnum};
use roundtable_domain::{ModelSpec, Participant};
use std::path::PathBuf;

/// Output format for one-shot results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Whole transcript plus the round table report
    Full,
    /// Only the newest exchange
    Latest,
    /// Session as JSON
    Json,
}

impl From<OutputFormat> for roundtable_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Latest => Self::Latest,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Chat with Anthropic, OpenAI and OpenRouter models, alone or as a round table")]
#[command(long_about = r#"
roundtable sends your messages to hosted LLMs.

Standard mode: one model answers each message.
Round table mode: every participant answers in turn, seeing the replies
of the others, and a chairman model summarizes each round.

Configuration files are loaded from (in priority order):
1. --config <path>                      Explicit config file
2. ./roundtable.toml                    Project-level config
3. ~/.config/roundtable/config.toml     Global config
Environment variables prefixed ROUNDTABLE_ override all files.

Example:
  roundtable "Explain Rust lifetimes"
  roundtable -m openai:gpt-4o "Compare tokio and async-std"
  roundtable --round-table -p claude=anthropic:claude-3-5-sonnet-20241022 \
      -p gpt=openai:gpt-4o --chairman anthropic:claude-3-7-sonnet-20250219 \
      "Is a monorepo worth it?"
  roundtable --chat
"#)]
pub struct Cli {
    /// The message to send (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Use round table mode
    #[arg(short = 'r', long)]
    pub round_table: bool,

    /// Model for standard mode, as provider:model
    #[arg(short, long, value_name = "PROVIDER:MODEL")]
    pub model: Option<ModelSpec>,

    /// Round table participant (can be specified multiple times)
    #[arg(
        short,
        long = "participant",
        value_name = "NAME=PROVIDER:MODEL",
        value_parser = parse_participant
    )]
    pub participants: Vec<Participant>,

    /// Chairman model for round table summaries
    #[arg(long, value_name = "PROVIDER:MODEL")]
    pub chairman: Option<ModelSpec>,

    /// Number of round table rounds
    #[arg(long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(short, long, value_name = "VALUE")]
    pub temperature: Option<f32>,

    /// Load a system prompt from the prompts directory
    #[arg(long, value_name = "NAME")]
    pub prompt: Option<String>,

    /// Continue a saved session
    #[arg(long, value_name = "NAME")]
    pub load: Option<String>,

    /// Save the session after answering
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List saved sessions and exit
    #[arg(long)]
    pub list_sessions: bool,

    /// List available prompts and exit
    #[arg(long)]
    pub list_prompts: bool,
}

/// Parse `name=provider:model`
pub fn parse_participant(s: &str) -> Result<Participant, String> {
    let (name, model) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PROVIDER:MODEL, got '{}'", s))?;
    let model: ModelSpec = model.parse().map_err(|e| format!("{}", e))?;
    Participant::new(name, model).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use roundtable_domain::Provider;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_participant() {
        let p = parse_participant("r1=openrouter:deepseek/deepseek-r1").unwrap();
        assert_eq!(p.name, "r1");
        assert_eq!(p.model.provider(), Provider::OpenRouter);
        assert_eq!(p.model.model(), "deepseek/deepseek-r1");
    }

    #[test]
    fn test_parse_participant_rejects_bad_input() {
        assert!(parse_participant("openai:gpt-4o").is_err());
        assert!(parse_participant("=openai:gpt-4o").is_err());
        assert!(parse_participant("x=gpt-4o").is_err());
    }

    #[test]
    fn test_round_table_flags() {
        let cli = Cli::try_parse_from([
            "roundtable",
            "--round-table",
            "-p",
            "a=anthropic:claude-3-5-sonnet-20241022",
            "-p",
            "b=openai:gpt-4o",
            "--chairman",
            "openai:gpt-4o",
            "--rounds",
            "2",
            "-o",
            "full",
            "What now?",
        ])
        .unwrap();

        assert!(cli.round_table);
        assert_eq!(cli.participants.len(), 2);
        assert_eq!(cli.participants[1].name, "b");
        assert_eq!(cli.chairman.unwrap().to_string(), "openai:gpt-4o");
        assert_eq!(cli.rounds, Some(2));
        assert_eq!(cli.output, Some(OutputFormat::Full));
        assert_eq!(cli.question.as_deref(), Some("What now?"));
    }

    #[test]
    fn test_invalid_model_is_rejected() {
        assert!(Cli::try_parse_from(["roundtable", "-m", "nope", "hi"]).is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            roundtable_domain::OutputFormat::from(OutputFormat::Json),
            roundtable_domain::OutputFormat::Json
        );
    }
}
