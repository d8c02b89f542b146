//! Test doubles shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use roundtable_domain::Provider;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Gateway that replays scripted replies in call order and records requests.
pub struct MockGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
}

impl MockGateway {
    pub fn with_replies(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            cancel_after: Mutex::new(None),
        }
    }

    /// Fire `token` once `calls` requests have been answered.
    pub fn cancel_after(self, calls: usize, token: CancellationToken) -> Self {
        *self.cancel_after.lock().unwrap() = Some((calls, token));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let calls = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("reply {}", calls)));

        if let Some((after, token)) = self.cancel_after.lock().unwrap().as_ref()
            && calls >= *after
        {
            token.cancel();
        }
        reply
    }

    fn is_available(&self, _provider: Provider) -> bool {
        true
    }
}

/// Logger that keeps every event in memory.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type.to_string(), event.payload));
    }
}
