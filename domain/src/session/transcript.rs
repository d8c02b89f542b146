//! Views over a session transcript.
//!
//! The stored history is speaker-attributed. Providers only know two
//! conversational roles, so each outbound call gets a view of the history
//! rendered from one speaker's perspective:
//!
//! - [`standard_view`]: the history as-is (standard mode)
//! - [`participant_view`]: the history as one round table participant sees it
//! - [`user_messages_view`]: only what the user said (chairman context)
//!
//! [`exchanges`] groups the history for display.

use crate::session::entities::{Message, Role};
use serde::{Deserialize, Serialize};

/// Nudge appended when a participant's view would otherwise end on its own reply
pub const CONTINUE_PROMPT: &str =
    "Continue the round table discussion, taking the other participants' points into account.";

/// A role-tagged message in the shape every provider understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One user query together with every reply that followed it
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub query: &'a Message,
    pub replies: &'a [Message],
}

/// Group the history into exchanges.
///
/// Messages that precede the first user message are skipped.
pub fn exchanges(history: &[Message]) -> Vec<Exchange<'_>> {
    let mut result = Vec::new();
    let mut i = 0;
    while i < history.len() {
        if history[i].role != Role::User {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < history.len() && history[end].role == Role::Assistant {
            end += 1;
        }
        result.push(Exchange {
            query: &history[i],
            replies: &history[start..end],
        });
        i = end;
    }
    result
}

/// Standard-mode view: user and assistant messages in order.
pub fn standard_view(history: &[Message]) -> Vec<PromptMessage> {
    coalesce(
        history
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| PromptMessage {
                role: m.role,
                content: m.content.clone(),
            }),
    )
}

/// Round table view for `speaker`.
///
/// The speaker's own replies stay `assistant`; everything said by the user
/// or by other speakers becomes `user` content, with other speakers tagged
/// as `[name]`. Chairman summaries are never the speaker's own. Adjacent
/// same-role messages are merged and a continuation nudge is added if the
/// view would end on the speaker's own reply.
pub fn participant_view(history: &[Message], speaker: &str) -> Vec<PromptMessage> {
    let mut view = coalesce(history.iter().filter_map(|m| match m.role {
        Role::System => None,
        Role::User => Some(PromptMessage::user(m.content.clone())),
        Role::Assistant => match m.source.as_deref() {
            Some(source) if source == speaker && !m.is_summary() => {
                Some(PromptMessage::assistant(m.content.clone()))
            }
            Some(source) => Some(PromptMessage::user(format!("[{}]: {}", source, m.content))),
            None => Some(PromptMessage::user(format!("[assistant]: {}", m.content))),
        },
    }));

    if view.last().is_some_and(|m| m.role == Role::Assistant) {
        view.push(PromptMessage::user(CONTINUE_PROMPT));
    }
    view
}

/// Only the user's messages, merged into role-alternating form.
pub fn user_messages_view(history: &[Message]) -> Vec<PromptMessage> {
    coalesce(
        history
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| PromptMessage::user(m.content.clone())),
    )
}

/// Merge adjacent messages with the same role (joined by a blank line).
pub fn coalesce(messages: impl IntoIterator<Item = PromptMessage>) -> Vec<PromptMessage> {
    let mut out: Vec<PromptMessage> = Vec::new();
    for message in messages {
        match out.last_mut() {
            Some(last) if last.role == message.role => {
                last.content.push_str("\n\n");
                last.content.push_str(&message.content);
            }
            _ => out.push(message),
        }
    }
    out
}
