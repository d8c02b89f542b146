//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use roundtable_application::{
    ConversationLogger, NoConversationLogger, NoProgress, ProgressNotifier, PromptStore,
    PromptStoreError, RoundTableReport, RunRoundTableUseCase, SendMessageUseCase,
    SessionPersistence, SessionStore,
};
use roundtable_domain::{ChatMode, Provider, Question, Session};
use roundtable_infrastructure::config::FileLoggingConfig;
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, FilePromptStore, JsonSessionStore, JsonlConversationLogger,
    RoutingGateway,
};
use roundtable_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ProgressReporter, ReplConfig, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Keeps the file writer flushing until exit
    let _log_guard = init_tracing(cli.verbose, &config.logging);
    info!("Starting roundtable");

    let defaults = config.chat_defaults().context("Invalid configuration")?;

    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
    };
    output.apply_color();

    // === Dependency Injection ===
    let sessions: Arc<dyn SessionStore> =
        Arc::new(JsonSessionStore::new(&config.paths.sessions_dir));
    let prompts: Arc<dyn PromptStore> = Arc::new(FilePromptStore::new(&config.paths.prompts_dir));

    if cli.list_sessions {
        print!("{}", ConsoleFormatter::format_sessions(&sessions.list()?));
        return Ok(());
    }
    if cli.list_prompts {
        for name in prompts.list()? {
            println!("{}", name);
        }
        return Ok(());
    }

    let persistence = SessionPersistence::new(Arc::clone(&sessions))
        .with_autosave_min_messages(defaults.autosave_min_messages);

    let mut session = match &cli.load {
        Some(name) => persistence
            .load(name)
            .with_context(|| format!("Failed to load session {}", name))?,
        None => {
            let mut session = defaults.new_session();
            if config.chat.system.is_none()
                && let Some(prompt) = default_prompt(&config, prompts.as_ref())
            {
                session.system = prompt;
            }
            session
        }
    };
    apply_overrides(&cli, &mut session, prompts.as_ref())?;

    let gateway = Arc::new(RoutingGateway::from_config(
        &config.providers.to_provider_config(),
    ));
    for provider in gateway.missing() {
        warn!(
            "No API key for {} (set {}); its models are unavailable",
            provider,
            api_key_env(&config, provider)
        );
    }

    let logger = conversation_logger(&config.logging);

    if cli.chat {
        let repl = ChatRepl::new(Arc::clone(&gateway), persistence, Arc::clone(&prompts), session)
            .with_conversation_logger(logger)
            .with_config(ReplConfig {
                show_progress: config.repl.show_progress && !cli.quiet,
                history_file: config.repl.history_file.as_ref().map(PathBuf::from),
            })
            .with_model_catalog(
                Provider::ALL
                    .iter()
                    .map(|p| (*p, config.models.catalog(*p)))
                    .collect(),
            );

        let session = repl.run().await?;
        if let Some(name) = &cli.save
            && !session.is_empty()
        {
            let stored = SessionPersistence::new(sessions).save(&session, name)?;
            eprintln!("Session saved as {}", stored);
        }
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question.as_deref() {
        Some(q) => Question::try_new(q)?,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let report = match session.mode {
        ChatMode::Standard => {
            SendMessageUseCase::new(Arc::clone(&gateway))
                .with_conversation_logger(Arc::clone(&logger))
                .execute_with_progress(&mut session, question, progress.as_ref())
                .await?;
            None
        }
        ChatMode::RoundTable => Some(
            run_round_table(gateway, logger, &mut session, question, progress.as_ref()).await?,
        ),
    };

    println!(
        "{}",
        ConsoleFormatter::format(&session, report.as_ref(), output.format)
    );

    match &cli.save {
        Some(name) => {
            let stored = persistence.save(&session, name)?;
            eprintln!("Session saved as {}", stored);
        }
        None => {
            persistence.autosave(&session);
        }
    }

    if let Some(report) = &report
        && report.replies() == 0
    {
        bail!("No participant replied");
    }

    Ok(())
}

/// Install the tracing subscriber. Returns the file writer guard when file
/// logging is enabled.
fn init_tracing(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = if logging.file_log {
        let appender =
            tracing_appender::rolling::daily(logging.resolved_log_dir(), "roundtable.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn conversation_logger(logging: &FileLoggingConfig) -> Arc<dyn ConversationLogger> {
    if !logging.conversation_log {
        return Arc::new(NoConversationLogger);
    }
    match JsonlConversationLogger::in_dir(logging.resolved_log_dir()) {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => {
            warn!("Conversation log disabled: could not open a log file");
            Arc::new(NoConversationLogger)
        }
    }
}

fn default_prompt(config: &FileConfig, prompts: &dyn PromptStore) -> Option<String> {
    let name = config.paths.default_prompt.as_deref()?;
    match prompts.load(name) {
        Ok(prompt) => {
            info!("Loaded default prompt {}", name);
            Some(prompt)
        }
        Err(PromptStoreError::NotFound(_)) => {
            debug!("Default prompt {} not present", name);
            None
        }
        Err(e) => {
            warn!("Default prompt not loaded: {}", e);
            None
        }
    }
}

fn api_key_env(config: &FileConfig, provider: Provider) -> &str {
    match provider {
        Provider::Anthropic => &config.providers.anthropic.api_key_env,
        Provider::OpenAi => &config.providers.openai.api_key_env,
        Provider::OpenRouter => &config.providers.openrouter.api_key_env,
    }
}

/// Apply command-line settings on top of the configured or loaded session
fn apply_overrides(cli: &Cli, session: &mut Session, prompts: &dyn PromptStore) -> Result<()> {
    if (cli.round_table || !cli.participants.is_empty())
        && session.switch_mode(ChatMode::RoundTable)
    {
        warn!("Switched the loaded session to round table mode; history was cleared");
    }
    if let Some(model) = &cli.model {
        session.settings.model = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        session.set_temperature(temperature)?;
    }

    if !cli.participants.is_empty() {
        let round_table = &mut session.round_table;
        let chairman = round_table.chairman().cloned();
        round_table.clear();
        if let Some(chairman) = chairman {
            round_table.set_chairman(chairman);
        }
        for participant in &cli.participants {
            round_table.add_participant(participant.clone())?;
        }
    }
    if let Some(chairman) = &cli.chairman {
        session.round_table.set_chairman(chairman.clone());
    }
    if let Some(rounds) = cli.rounds {
        session.round_table.set_rounds(rounds)?;
    }

    if let Some(name) = &cli.prompt {
        session.system = prompts
            .load(name)
            .with_context(|| format!("Failed to load prompt {}", name))?;
    }
    Ok(())
}

/// Run one round table, stopping before the next turn on Ctrl-C
async fn run_round_table(
    gateway: Arc<RoutingGateway>,
    logger: Arc<dyn ConversationLogger>,
    session: &mut Session,
    question: Question,
    progress: &dyn ProgressNotifier,
) -> Result<RoundTableReport> {
    let token = CancellationToken::new();
    let watcher = tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        }
    });

    let result = RunRoundTableUseCase::new(gateway)
        .with_conversation_logger(logger)
        .with_cancellation(token)
        .execute_with_progress(session, question, progress)
        .await;
    watcher.abort();

    Ok(result?)
}
