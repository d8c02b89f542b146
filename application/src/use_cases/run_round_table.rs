//! Run Round Table use case
//!
//! Participants answer one after another in a shared transcript and the
//! chairman closes every round with a summary. Turns are strictly
//! sequential; the order comes from [`TurnPlan`].

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use roundtable_domain::session::transcript::{
    PromptMessage, coalesce, participant_view, user_messages_view,
};
use roundtable_domain::{
    DomainError, Message, ModelSpec, PromptTemplate, Question, Session, Turn, TurnPlan,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that prevent a round table run from starting
#[derive(Error, Debug)]
pub enum RoundTableError {
    #[error("Round table is not ready: {0}")]
    NotConfigured(DomainError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What happened on one turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Reply appended to the transcript
    Replied,
    /// Provider call failed; nothing appended
    Failed(String),
    /// Turn not attempted
    Skipped(String),
}

/// One entry of the run report
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRecord {
    pub turn: Turn,
    pub speaker: String,
    pub model: ModelSpec,
    pub outcome: TurnOutcome,
}

impl TurnRecord {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, TurnOutcome::Failed(_))
    }
}

/// Result of a round table run
///
/// Failures are recorded here rather than in the transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundTableReport {
    pub records: Vec<TurnRecord>,
    /// Rounds whose chairman turn was reached
    pub rounds_completed: u32,
    /// The run stopped early because cancellation was requested
    pub cancelled: bool,
}

impl RoundTableReport {
    pub fn replies(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == TurnOutcome::Replied)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TurnRecord> {
        self.records.iter().filter(|r| r.is_failure())
    }

    /// Every planned turn produced a reply
    pub fn is_clean(&self) -> bool {
        !self.cancelled
            && self
                .records
                .iter()
                .all(|r| r.outcome == TurnOutcome::Replied)
    }
}

/// Use case for running a round table discussion
pub struct RunRoundTableUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunRoundTableUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        session: &mut Session,
        question: Question,
    ) -> Result<RoundTableReport, RoundTableError> {
        self.execute_with_progress(session, question, &NoProgress)
            .await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        session: &mut Session,
        question: Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<RoundTableReport, RoundTableError> {
        session
            .round_table
            .validate()
            .map_err(RoundTableError::NotConfigured)?;

        let config = session.round_table.clone();
        let participants = config.participants();
        let (Some(chairman), Some(chairman_label)) =
            (config.chairman().cloned(), config.chairman_label())
        else {
            return Err(RoundTableError::NotConfigured(DomainError::NoChairman));
        };

        session.push(Message::user(question.content()))?;
        self.logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({
                "mode": "round_table",
                "content": question.content(),
            }),
        ));

        let plan = TurnPlan::new(participants.len(), config.rounds());
        info!(
            "Starting round table: {} participants, {} rounds, {} turns",
            participants.len(),
            config.rounds(),
            plan.total()
        );
        progress.on_run_start(plan.total());

        let mut report = RoundTableReport::default();
        let mut round_replies: Vec<(String, String)> = Vec::new();

        for turn in plan {
            if self.is_cancelled() {
                info!("Round table cancelled before {:?}", turn);
                report.cancelled = true;
                break;
            }

            match turn {
                Turn::Participant { index, .. } => {
                    if index == 0 {
                        round_replies.clear();
                    }
                    let participant = &participants[index];
                    let request = CompletionRequest::new(
                        participant.model.clone(),
                        PromptTemplate::participant_system(
                            participant.system_prompt.as_deref().unwrap_or(&session.system),
                        ),
                        participant_view(session.messages(), &participant.name),
                        participant
                            .temperature
                            .unwrap_or(session.settings.temperature),
                    );

                    progress.on_turn_start(&turn, &participant.name, &participant.model);
                    let outcome = match self.call(&request).await {
                        Ok(text) => {
                            session.push(Message::from_participant(&participant.name, &text))?;
                            self.logger.log(ConversationEvent::new(
                                "participant_reply",
                                serde_json::json!({
                                    "round": turn.round(),
                                    "participant": participant.name,
                                    "model": participant.model.to_string(),
                                    "content": text,
                                }),
                            ));
                            round_replies.push((participant.name.clone(), text));
                            TurnOutcome::Replied
                        }
                        Err(e) => {
                            warn!("Participant {} failed: {}", participant.name, e);
                            self.logger.log(ConversationEvent::new(
                                "participant_error",
                                serde_json::json!({
                                    "round": turn.round(),
                                    "participant": participant.name,
                                    "model": participant.model.to_string(),
                                    "error": e.to_string(),
                                    "category": e.category(),
                                }),
                            ));
                            TurnOutcome::Failed(e.to_string())
                        }
                    };
                    progress.on_turn_complete(
                        &turn,
                        &participant.name,
                        outcome == TurnOutcome::Replied,
                    );
                    report.records.push(TurnRecord {
                        turn,
                        speaker: participant.name.clone(),
                        model: participant.model.clone(),
                        outcome,
                    });
                }
                Turn::Chairman { round } => {
                    let outcome = if round_replies.is_empty() {
                        debug!("Skipping chairman for round {}: no replies", round);
                        TurnOutcome::Skipped("no participant replied this round".to_string())
                    } else {
                        let mut messages = user_messages_view(session.messages());
                        messages.push(PromptMessage::user(PromptTemplate::chairman_context(
                            &round_replies,
                        )));
                        let request = CompletionRequest::new(
                            chairman.clone(),
                            PromptTemplate::chairman_system(&session.system),
                            coalesce(messages),
                            session.settings.temperature,
                        );

                        progress.on_turn_start(&turn, &chairman_label, &chairman);
                        let outcome = match self.call(&request).await {
                            Ok(text) => {
                                session.push(Message::summary(&chairman_label, &text))?;
                                self.logger.log(ConversationEvent::new(
                                    "chairman_summary",
                                    serde_json::json!({
                                        "round": round,
                                        "model": chairman.to_string(),
                                        "content": text,
                                    }),
                                ));
                                TurnOutcome::Replied
                            }
                            Err(e) => {
                                warn!("Chairman failed on round {}: {}", round, e);
                                self.logger.log(ConversationEvent::new(
                                    "chairman_error",
                                    serde_json::json!({
                                        "round": round,
                                        "model": chairman.to_string(),
                                        "error": e.to_string(),
                                        "category": e.category(),
                                    }),
                                ));
                                TurnOutcome::Failed(e.to_string())
                            }
                        };
                        progress.on_turn_complete(
                            &turn,
                            &chairman_label,
                            outcome == TurnOutcome::Replied,
                        );
                        outcome
                    };

                    report.records.push(TurnRecord {
                        turn,
                        speaker: chairman_label.clone(),
                        model: chairman.clone(),
                        outcome,
                    });
                    report.rounds_completed = round;
                    progress.on_round_complete(round);
                }
            }
        }

        progress.on_run_complete(report.cancelled);
        info!(
            "Round table finished: {} replies, {} failures{}",
            report.replies(),
            report.failures().count(),
            if report.cancelled { " (cancelled)" } else { "" }
        );
        Ok(report)
    }

    /// One provider call; an empty reply counts as a failure
    async fn call(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        debug!(
            "Calling {} with {} messages",
            request.model,
            request.messages.len()
        );
        let text = self.gateway.complete(request).await?;
        if text.trim().is_empty() {
            return Err(GatewayError::InvalidResponse(
                "empty response".to_string(),
            ));
        }
        Ok(text)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(|t| t.is_cancelled())
    }
}
