//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::chat::command::ReplCommand;
use crate::config::ReplConfig;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use roundtable_application::{
    ConversationLogger, LlmGateway, NoConversationLogger, NoProgress, ProgressNotifier,
    PromptStore, RunRoundTableUseCase, SendMessageUseCase, SessionPersistence,
};
use roundtable_domain::{ChatMode, Participant, Provider, Question, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// What a slash command asks the loop to do
#[derive(Debug, PartialEq)]
enum Reply {
    Text(String),
    Quit,
}

/// Interactive chat REPL
///
/// Owns the current [`Session`]; every command and message mutates it in place.
pub struct ChatRepl<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    logger: Arc<dyn ConversationLogger>,
    persistence: SessionPersistence,
    prompts: Arc<dyn PromptStore>,
    catalog: Vec<(Provider, Vec<String>)>,
    config: ReplConfig,
    session: Session,
}

impl<G: LlmGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(
        gateway: Arc<G>,
        persistence: SessionPersistence,
        prompts: Arc<dyn PromptStore>,
        session: Session,
    ) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoConversationLogger),
            persistence,
            prompts,
            catalog: Provider::ALL
                .iter()
                .map(|p| {
                    (
                        *p,
                        p.default_models().iter().map(|m| m.to_string()).collect(),
                    )
                })
                .collect(),
            config: ReplConfig::default(),
            session,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Model ids offered by `/models`, per provider
    pub fn with_model_catalog(mut self, catalog: Vec<(Provider, Vec<String>)>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the interactive REPL, returning the final session
    pub async fn run(mut self) -> std::io::Result<Session> {
        let mut line_editor = Reedline::create();

        if let Some(history) = self.config.history_path().and_then(open_history) {
            line_editor = line_editor.with_history(Box::new(history));
        }

        self.print_welcome();

        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(self.prompt_label()),
                DefaultPromptSegment::Empty,
            );

            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        let reply = ReplCommand::parse(line)
                            .map_err(|e| e.to_string())
                            .and_then(|command| self.handle_command(command));
                        match reply {
                            Ok(Reply::Text(text)) => println!("{}\n", text),
                            Ok(Reply::Quit) => {
                                println!("Bye!");
                                break;
                            }
                            Err(e) => eprintln!("{}\n", e.red()),
                        }
                        continue;
                    }

                    self.process_message(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(self.session)
    }

    fn prompt_label(&self) -> String {
        match self.session.mode {
            ChatMode::Standard => format!("standard {}", self.session.settings.model),
            ChatMode::RoundTable => format!(
                "roundtable {}p/{}r",
                self.session.round_table.participants().len(),
                self.session.round_table.rounds()
            ),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            roundtable - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{} {}", "Mode:".cyan().bold(), self.session.mode);
        match self.session.mode {
            ChatMode::Standard => {
                println!("{} {}", "Model:".cyan().bold(), self.session.settings.model)
            }
            ChatMode::RoundTable => print!(
                "{}",
                ConsoleFormatter::format_participants(&self.session.round_table)
            ),
        }
        for provider in Provider::ALL {
            if !self.gateway.is_available(provider) {
                println!(
                    "{}",
                    format!("No API key for {}; its models are unavailable.", provider).yellow()
                );
            }
        }
        println!();
        println!("Type /help for commands, /quit to exit.");
        println!();
    }

    /// Apply a slash command to the session
    fn handle_command(&mut self, command: ReplCommand) -> Result<Reply, String> {
        let text = match command {
            ReplCommand::Help => ReplCommand::help().to_string(),
            ReplCommand::Quit => return Ok(Reply::Quit),
            ReplCommand::Mode(mode) => {
                if self.session.mode == mode {
                    format!("Already in {} mode.", mode)
                } else if self.session.switch_mode(mode) {
                    format!("Switched to {} mode; started a new conversation.", mode)
                } else {
                    format!("Switched to {} mode.", mode)
                }
            }
            ReplCommand::Model(model) => {
                let mut text = format!("Model set to {}.", model);
                text.push_str(&self.availability_note(model.provider()));
                self.session.settings.model = model;
                text
            }
            ReplCommand::Models(provider) => self.format_catalog(provider),
            ReplCommand::Temperature(temperature) => {
                self.session
                    .set_temperature(temperature)
                    .map_err(|e| e.to_string())?;
                format!("Temperature set to {}.", temperature)
            }
            ReplCommand::Add {
                name,
                model,
                temperature,
            } => {
                let mut participant = Participant::new(name, model).map_err(|e| e.to_string())?;
                if let Some(t) = temperature {
                    participant = participant.with_temperature(t).map_err(|e| e.to_string())?;
                }
                let mut text = format!("Added {} ({}).", participant.name, participant.model);
                text.push_str(&self.availability_note(participant.model.provider()));
                self.session
                    .round_table
                    .add_participant(participant)
                    .map_err(|e| e.to_string())?;
                text
            }
            ReplCommand::Remove(name) => {
                let removed = self
                    .session
                    .round_table
                    .remove_participant(&name)
                    .map_err(|e| e.to_string())?;
                format!("Removed {}.", removed.name)
            }
            ReplCommand::Chairman(model) => {
                let mut text = format!("Chairman set to {}.", model);
                text.push_str(&self.availability_note(model.provider()));
                self.session.round_table.set_chairman(model);
                text
            }
            ReplCommand::Rounds(rounds) => {
                self.session
                    .round_table
                    .set_rounds(rounds)
                    .map_err(|e| e.to_string())?;
                format!("Rounds set to {}.", rounds)
            }
            ReplCommand::Participants => {
                ConsoleFormatter::format_participants(&self.session.round_table)
            }
            ReplCommand::Prompt(name) => {
                let prompt = self.prompts.load(&name).map_err(|e| e.to_string())?;
                self.session.system = prompt;
                format!("Loaded prompt {}.", name)
            }
            ReplCommand::Prompts => {
                let names = self.prompts.list().map_err(|e| e.to_string())?;
                if names.is_empty() {
                    "No saved prompts.".dimmed().to_string()
                } else {
                    names
                        .iter()
                        .map(|n| format!("  {}", n))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            ReplCommand::System(text) => {
                self.session.system = text;
                "System prompt updated.".to_string()
            }
            ReplCommand::Save(name) => {
                let stored = self
                    .persistence
                    .save(&self.session, &name)
                    .map_err(|e| e.to_string())?;
                format!("Session saved as {}.", stored)
            }
            ReplCommand::Load(name) => {
                let session = self.persistence.load(&name).map_err(|e| e.to_string())?;
                self.session = session;
                format!(
                    "Loaded {} ({} messages, {} mode).",
                    name,
                    self.session.len(),
                    self.session.mode
                )
            }
            ReplCommand::Sessions => {
                let entries = self.persistence.list().map_err(|e| e.to_string())?;
                ConsoleFormatter::format_sessions(&entries)
            }
            ReplCommand::Show => ConsoleFormatter::format_transcript(&self.session),
            ReplCommand::Clear => {
                self.session = self.session.cleared();
                "Conversation cleared.".to_string()
            }
        };
        Ok(Reply::Text(text))
    }

    fn availability_note(&self, provider: Provider) -> String {
        if self.gateway.is_available(provider) {
            String::new()
        } else {
            format!(" Warning: no API key configured for {}.", provider)
        }
    }

    fn format_catalog(&self, provider: Option<Provider>) -> String {
        let current = self.session.settings.model.to_string();
        let mut lines = Vec::new();
        for (p, models) in &self.catalog {
            if provider.is_some_and(|wanted| wanted != *p) {
                continue;
            }
            lines.push(format!("{}:", p.display_name().bold()));
            for model in models {
                let spec = format!("{}:{}", p.as_str(), model);
                let marker = if spec == current { "*" } else { " " };
                lines.push(format!("  {} {}", marker, spec));
            }
        }
        lines.join("\n")
    }

    fn progress(&self) -> Box<dyn ProgressNotifier> {
        if self.config.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        }
    }

    async fn process_message(&mut self, text: &str) {
        let question = match Question::try_new(text) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                return;
            }
        };

        let succeeded = match self.session.mode {
            ChatMode::Standard => self.send_standard(question).await,
            ChatMode::RoundTable => self.run_round_table(question).await,
        };

        if succeeded && let Some(name) = self.persistence.autosave(&self.session) {
            debug!("Session auto-saved as {}", name);
        }
        println!();
    }

    /// Standard mode. Ctrl-C abandons the pending request.
    async fn send_standard(&mut self, question: Question) -> bool {
        let use_case = SendMessageUseCase::new(Arc::clone(&self.gateway))
            .with_conversation_logger(Arc::clone(&self.logger));
        let progress = self.progress();
        let model = self.session.settings.model.clone();

        let result = tokio::select! {
            result = use_case.execute_with_progress(&mut self.session, question, progress.as_ref()) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };

        match result {
            Some(Ok(_)) => {
                println!("{}", ConsoleFormatter::format_latest(&self.session));
                true
            }
            Some(Err(e)) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                false
            }
            None => {
                progress.on_request_complete(&model, false);
                eprintln!("{}", "Request cancelled.".yellow());
                false
            }
        }
    }

    /// Round table mode. Ctrl-C stops the run before the next turn.
    async fn run_round_table(&mut self, question: Question) -> bool {
        if let Err(e) = self.session.round_table.validate() {
            eprintln!(
                "{} {}\nUse /add <name> <provider:model> and /chairman <provider:model>.",
                "Round table is not ready:".red().bold(),
                e
            );
            return false;
        }

        let token = CancellationToken::new();
        let watcher = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            }
        });

        let use_case = RunRoundTableUseCase::new(Arc::clone(&self.gateway))
            .with_conversation_logger(Arc::clone(&self.logger))
            .with_cancellation(token);
        let progress = self.progress();
        let result = use_case
            .execute_with_progress(&mut self.session, question, progress.as_ref())
            .await;
        watcher.abort();

        match result {
            Ok(report) => {
                println!("{}", ConsoleFormatter::format_latest(&self.session));
                if !report.is_clean() {
                    println!("{}", ConsoleFormatter::format_report(&report));
                }
                report.replies() > 0
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                false
            }
        }
    }
}

/// Open the line history file, creating its directory first.
///
/// Returns `None` (with a warning) when the file cannot be used.
fn open_history(path: PathBuf) -> Option<FileBackedHistory> {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!("Cannot create history directory {}: {}", parent.display(), e);
        return None;
    }
    match FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
        Ok(history) => Some(history),
        Err(e) => {
            warn!("Line history disabled: {}", e);
            None
        }
    }
}
