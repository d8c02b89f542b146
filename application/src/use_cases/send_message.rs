//! Send Message use case
//!
//! Standard chat: one model answers each user message.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use roundtable_domain::session::transcript::standard_view;
use roundtable_domain::{DomainError, Message, PromptTemplate, Question, Session};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while sending a standard-mode message
#[derive(Error, Debug)]
pub enum SendMessageError {
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Use case for standard chat
pub struct SendMessageUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> SendMessageUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        session: &mut Session,
        question: Question,
    ) -> Result<String, SendMessageError> {
        self.execute_with_progress(session, question, &NoProgress)
            .await
    }

    /// Send the question with the whole history and append both sides.
    ///
    /// The user message and the reply are appended together only when the
    /// call succeeds, so a failed call leaves the session untouched.
    pub async fn execute_with_progress(
        &self,
        session: &mut Session,
        question: Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, SendMessageError> {
        let user_message = Message::user(question.content());

        let mut outgoing = session.messages().to_vec();
        outgoing.push(user_message.clone());
        let messages = standard_view(&outgoing);

        let model = session.settings.model.clone();
        let request = CompletionRequest::new(
            model.clone(),
            PromptTemplate::base_system(&session.system),
            messages,
            session.settings.temperature,
        );

        self.logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({
                "mode": "standard",
                "content": question.content(),
            }),
        ));

        info!("Sending message to {}", model);
        debug!("Request carries {} messages", request.messages.len());
        progress.on_request_start(&model);

        let reply = match self.gateway.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Model {} returned an empty response", model);
                progress.on_request_complete(&model, false);
                self.log_error(&model.to_string(), "empty response");
                return Err(SendMessageError::EmptyResponse);
            }
            Err(e) => {
                warn!("Model {} failed: {}", model, e);
                progress.on_request_complete(&model, false);
                self.log_error(&model.to_string(), &e.to_string());
                return Err(e.into());
            }
        };
        progress.on_request_complete(&model, true);

        session.push(user_message)?;
        session.push(Message::assistant(reply.clone()))?;

        self.logger.log(ConversationEvent::new(
            "chat_reply",
            serde_json::json!({
                "model": model.to_string(),
                "content": reply,
                "bytes": reply.len(),
            }),
        ));

        Ok(reply)
    }

    fn log_error(&self, model: &str, error: &str) {
        self.logger.log(ConversationEvent::new(
            "chat_error",
            serde_json::json!({
                "model": model,
                "error": error,
            }),
        ));
    }
}
