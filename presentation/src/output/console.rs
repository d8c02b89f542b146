//! Console output formatter for sessions and round table runs

use chrono::Local;
use colored::Colorize;
use roundtable_application::{RoundTableReport, SessionEntry, TurnOutcome};
use roundtable_domain::session::transcript::exchanges;
use roundtable_domain::{ChatMode, Exchange, Message, OutputFormat, RoundTableConfig, Session, Turn};
use serde::Serialize;

/// Formats sessions and run reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format according to the selected output format
    pub fn format(
        session: &Session,
        report: Option<&RoundTableReport>,
        format: OutputFormat,
    ) -> String {
        match format {
            OutputFormat::Full => {
                let mut output = Self::format_transcript(session);
                if let Some(report) = report {
                    output.push_str(&Self::format_report(report));
                }
                output
            }
            OutputFormat::Latest => {
                let mut output = Self::format_latest(session);
                if let Some(report) = report
                    && !report.is_clean()
                {
                    output.push_str(&Self::format_report(report));
                }
                output
            }
            OutputFormat::Json => Self::format_json(session, report),
        }
    }

    /// Format the whole transcript, grouped per user query
    pub fn format_transcript(session: &Session) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&session.title()));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Mode:".cyan().bold(),
            session.mode.display_name()
        ));
        match session.mode {
            ChatMode::Standard => output.push_str(&format!(
                "{} {} (temperature {})\n",
                "Model:".cyan().bold(),
                session.settings.model,
                session.settings.temperature
            )),
            ChatMode::RoundTable => output.push_str(&format!(
                "{} {}\n",
                "Participants:".cyan().bold(),
                Self::participant_names(&session.round_table)
            )),
        }

        let groups = exchanges(session.messages());
        if groups.is_empty() {
            output.push_str(&format!("\n{}\n", "(no messages yet)".dimmed()));
        }
        for exchange in &groups {
            output.push_str(&Self::divider());
            output.push_str(&Self::format_exchange(exchange));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format only the newest exchange
    pub fn format_latest(session: &Session) -> String {
        match exchanges(session.messages()).last() {
            Some(exchange) => Self::format_replies(exchange.replies),
            None => String::new(),
        }
    }

    /// One user query and every reply that followed it
    pub fn format_exchange(exchange: &Exchange<'_>) -> String {
        let mut output = format!(
            "\n{}\n{}\n",
            "You:".cyan().bold(),
            exchange.query.content
        );
        output.push_str(&Self::format_replies(exchange.replies));
        output
    }

    fn format_replies(replies: &[Message]) -> String {
        let mut output = String::new();
        for (i, reply) in replies.iter().enumerate() {
            if i > 0 {
                output.push_str(&format!("\n{}\n", "-".repeat(40).dimmed()));
            }
            output.push_str(&format!(
                "\n{}\n{}\n",
                Self::speaker_label(reply),
                reply.content
            ));
        }
        output
    }

    fn speaker_label(message: &Message) -> String {
        match (&message.source, message.is_summary()) {
            (Some(label), true) => format!("== {} ==", label).green().bold().to_string(),
            (Some(name), false) => format!("── {} ──", name).yellow().bold().to_string(),
            (None, _) => "Assistant:".yellow().bold().to_string(),
        }
    }

    /// Per-turn outcome of a round table run
    pub fn format_report(report: &RoundTableReport) -> String {
        let mut output = Self::section_header("Round Table Report");

        for record in &report.records {
            let turn = match record.turn {
                Turn::Participant { round, .. } => format!("Round {}", round),
                Turn::Chairman { round } => format!("Round {} summary", round),
            };
            let line = match &record.outcome {
                TurnOutcome::Replied => format!(
                    "  {} {} {} ({})",
                    "v".green(),
                    turn,
                    record.speaker,
                    record.model
                ),
                TurnOutcome::Failed(error) => format!(
                    "  {} {} {} ({}): {}",
                    "x".red(),
                    turn,
                    record.speaker,
                    record.model,
                    error
                )
                .red()
                .to_string(),
                TurnOutcome::Skipped(reason) => format!(
                    "  {} {} {} skipped: {}",
                    "-".dimmed(),
                    turn,
                    record.speaker,
                    reason
                ),
            };
            output.push_str(&line);
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} replies, {} failures, {} rounds completed",
            report.replies(),
            report.failures().count(),
            report.rounds_completed
        ));
        if report.cancelled {
            output.push_str(&format!(" {}", "(cancelled)".yellow()));
        }
        output.push('\n');
        output
    }

    /// Session (and report, when given) as pretty JSON
    pub fn format_json(session: &Session, report: Option<&RoundTableReport>) -> String {
        let document = JsonDocument {
            session,
            report: report.map(ReportJson::from),
        };
        serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
    }

    /// Participants, chairman and rounds of a round table
    pub fn format_participants(config: &RoundTableConfig) -> String {
        let mut output = String::new();
        if config.participants().is_empty() {
            output.push_str(&format!("{}\n", "No participants configured.".dimmed()));
        }
        for (i, participant) in config.participants().iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ({})",
                i + 1,
                participant.name.bold(),
                participant.model
            ));
            if let Some(temperature) = participant.temperature {
                output.push_str(&format!(" temperature {}", temperature));
            }
            output.push('\n');
        }
        let chairman = config
            .chairman()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "not set".to_string());
        output.push_str(&format!("{} {}\n", "Chairman:".cyan().bold(), chairman));
        output.push_str(&format!("{} {}\n", "Rounds:".cyan().bold(), config.rounds()));
        output
    }

    /// Saved sessions, newest first
    pub fn format_sessions(entries: &[SessionEntry]) -> String {
        if entries.is_empty() {
            return format!("{}\n", "No saved sessions.".dimmed());
        }
        entries
            .iter()
            .map(|entry| {
                format!(
                    "  {}  {}\n",
                    entry
                        .modified
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .dimmed(),
                    entry.name
                )
            })
            .collect()
    }

    fn participant_names(config: &RoundTableConfig) -> String {
        if config.participants().is_empty() {
            return "none".to_string();
        }
        config
            .participants()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn divider() -> String {
        format!("\n{}\n", "─".repeat(60).dimmed())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    session: &'a Session,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<ReportJson>,
}

#[derive(Serialize)]
struct ReportJson {
    rounds_completed: u32,
    cancelled: bool,
    turns: Vec<TurnJson>,
}

#[derive(Serialize)]
struct TurnJson {
    round: u32,
    speaker: String,
    model: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl From<&RoundTableReport> for ReportJson {
    fn from(report: &RoundTableReport) -> Self {
        Self {
            rounds_completed: report.rounds_completed,
            cancelled: report.cancelled,
            turns: report
                .records
                .iter()
                .map(|record| {
                    let (outcome, detail) = match &record.outcome {
                        TurnOutcome::Replied => ("replied", None),
                        TurnOutcome::Failed(e) => ("failed", Some(e.clone())),
                        TurnOutcome::Skipped(r) => ("skipped", Some(r.clone())),
                    };
                    TurnJson {
                        round: record.turn.round(),
                        speaker: record.speaker.clone(),
                        model: record.model.to_string(),
                        outcome,
                        detail,
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_application::TurnRecord;
    use roundtable_domain::{ModelSpec, Participant, Provider};

    fn round_table_session() -> Session {
        let mut session = Session::new("");
        session.mode = ChatMode::RoundTable;
        session
            .round_table
            .add_participant(Participant::new("alice", ModelSpec::default()).unwrap())
            .unwrap();
        session.push(Message::user("What is Rust?")).unwrap();
        session
            .push(Message::from_participant("alice", "A systems language."))
            .unwrap();
        session
            .push(Message::summary("Chairman (gpt-4o)", "They agree."))
            .unwrap();
        session
    }

    fn report() -> RoundTableReport {
        let model = ModelSpec::new(Provider::OpenAi, "gpt-4o").unwrap();
        RoundTableReport {
            records: vec![
                TurnRecord {
                    turn: Turn::Participant { round: 1, index: 0 },
                    speaker: "alice".to_string(),
                    model: model.clone(),
                    outcome: TurnOutcome::Replied,
                },
                TurnRecord {
                    turn: Turn::Participant { round: 1, index: 1 },
                    speaker: "bob".to_string(),
                    model: model.clone(),
                    outcome: TurnOutcome::Failed("Rate limited: slow down".to_string()),
                },
                TurnRecord {
                    turn: Turn::Chairman { round: 1 },
                    speaker: "Chairman (gpt-4o)".to_string(),
                    model,
                    outcome: TurnOutcome::Replied,
                },
            ],
            rounds_completed: 1,
            cancelled: false,
        }
    }

    #[test]
    fn test_transcript_shows_every_speaker() {
        let output = ConsoleFormatter::format_transcript(&round_table_session());
        assert!(output.contains("What is Rust?"));
        assert!(output.contains("alice"));
        assert!(output.contains("A systems language."));
        assert!(output.contains("Chairman (gpt-4o)"));
        assert!(output.contains("They agree."));
    }

    #[test]
    fn test_latest_shows_only_newest_exchange() {
        let mut session = Session::new("");
        session.push(Message::user("first")).unwrap();
        session.push(Message::assistant("old answer")).unwrap();
        session.push(Message::user("second")).unwrap();
        session.push(Message::assistant("new answer")).unwrap();

        let output = ConsoleFormatter::format_latest(&session);
        assert!(output.contains("new answer"));
        assert!(!output.contains("old answer"));
    }

    #[test]
    fn test_latest_of_empty_session_is_empty() {
        assert!(ConsoleFormatter::format_latest(&Session::new("")).is_empty());
    }

    #[test]
    fn test_report_lists_failures() {
        let output = ConsoleFormatter::format_report(&report());
        assert!(output.contains("bob"));
        assert!(output.contains("Rate limited: slow down"));
        assert!(output.contains("2 replies, 1 failures, 1 rounds completed"));
    }

    #[test]
    fn test_latest_format_appends_report_only_on_trouble() {
        let session = round_table_session();
        let mut clean = report();
        clean.records.remove(1);

        let quiet = ConsoleFormatter::format(&session, Some(&clean), OutputFormat::Latest);
        assert!(!quiet.contains("Round Table Report"));

        let noisy = ConsoleFormatter::format(&session, Some(&report()), OutputFormat::Latest);
        assert!(noisy.contains("Round Table Report"));
    }

    #[test]
    fn test_json_contains_session_and_report() {
        let output = ConsoleFormatter::format_json(&round_table_session(), Some(&report()));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["session"]["mode"], "round_table");
        assert_eq!(value["session"]["history"].as_array().unwrap().len(), 3);
        assert_eq!(value["report"]["turns"][1]["outcome"], "failed");
        assert_eq!(value["report"]["turns"][2]["round"], 1);
    }

    #[test]
    fn test_json_without_report() {
        let output = ConsoleFormatter::format_json(&Session::new(""), None);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value.get("report").is_none());
    }

    #[test]
    fn test_participants_listing() {
        let session = round_table_session();
        let output = ConsoleFormatter::format_participants(&session.round_table);
        assert!(output.contains("1. "));
        assert!(output.contains("alice"));
        assert!(output.contains("not set"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
