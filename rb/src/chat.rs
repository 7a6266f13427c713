//! Conversation session and chat message types

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::relay::{RelayApi, RelayError};

/// System context injected when a follow-up arrives on an empty session
pub const DEFAULT_SYSTEM_CONTEXT: &str = "You are a helpful beauty routine assistant. \
     Answer questions about products and routines. Use the selected products if relevant.";

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Session lifecycle: Idle until a request is in flight, then back to Idle
/// once the reply is appended or the error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingReply,
}

/// Errors surfaced by a conversation turn
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A request is already in flight for this session")]
    Busy,

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// One routine-discussion transcript exchanged with the relay
///
/// An append-only ordered message log. Invariant: when non-empty, the first
/// message is always a system message establishing assistant context. The
/// log lives in memory only and is never persisted across restarts.
#[derive(Debug, Default)]
pub struct ConversationSession {
    messages: Vec<ChatMessage>,
    state: SessionState,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered message log
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Empty the log and drop any stale in-flight marker
    pub fn reset(&mut self) {
        debug!(discarded = self.messages.len(), "Session reset");
        self.messages.clear();
        self.state = SessionState::Idle;
    }

    /// Start a fresh routine conversation: the log becomes exactly
    /// [system, user].
    pub fn seed(&mut self, system_prompt: impl Into<String>, user_prompt: impl Into<String>) {
        self.reset();
        self.messages.push(ChatMessage::system(system_prompt));
        self.messages.push(ChatMessage::user(user_prompt));
    }

    /// Append a user message, injecting the default system context first if
    /// the session is empty
    ///
    /// Empty or whitespace-only text is a no-op. Returns whether a message
    /// was appended.
    pub fn append_user(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank user message");
            return false;
        }

        if self.messages.is_empty() {
            self.messages.push(ChatMessage::system(DEFAULT_SYSTEM_CONTEXT));
        }
        self.messages.push(ChatMessage::user(text));
        true
    }

    /// Append an assistant reply; only called after a successful relay
    /// response
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(text));
    }

    /// Send the whole log to the relay and append the reply
    ///
    /// One shot: no retries, no streaming, no timeout. A second send while a
    /// request is in flight is rejected with [`SessionError::Busy`]. On any
    /// relay failure the log is left untouched so the turn can be retried.
    pub async fn send(&mut self, relay: &dyn RelayApi) -> Result<String, SessionError> {
        if self.state == SessionState::AwaitingReply {
            warn!("Rejecting send: a request is already in flight");
            return Err(SessionError::Busy);
        }

        self.state = SessionState::AwaitingReply;
        debug!(messages = self.messages.len(), "Sending conversation to relay");

        let result = relay.complete(&self.messages).await;
        self.state = SessionState::Idle;

        match result {
            Ok(reply) => {
                self.append_assistant(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, "Relay turn failed, session preserved");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::mock::MockRelay;

    #[test]
    fn test_first_user_message_injects_system_context() {
        let mut session = ConversationSession::new();
        assert!(session.append_user("hi"));

        assert_eq!(session.len(), 2);
        assert_eq!(session.messages()[0].role, Role::System);
        assert_eq!(session.messages()[0].content, DEFAULT_SYSTEM_CONTEXT);
        assert_eq!(session.messages()[1], ChatMessage::user("hi"));
    }

    #[test]
    fn test_blank_user_messages_are_noops() {
        let mut session = ConversationSession::new();
        assert!(!session.append_user(""));
        assert!(!session.append_user("   "));
        assert!(session.is_empty());
    }

    #[test]
    fn test_later_user_messages_do_not_reinject_system() {
        let mut session = ConversationSession::new();
        session.append_user("first");
        session.append_user("second");

        assert_eq!(session.len(), 3);
        assert_eq!(session.messages()[2], ChatMessage::user("second"));
    }

    #[test]
    fn test_seed_replaces_the_log() {
        let mut session = ConversationSession::new();
        session.append_user("old turn");

        session.seed("routine prompt", "my products");
        assert_eq!(
            session.messages(),
            &[ChatMessage::system("routine prompt"), ChatMessage::user("my products")]
        );
    }

    #[test]
    fn test_reset_empties_the_log() {
        let mut session = ConversationSession::new();
        session.append_user("hello");
        session.reset();
        assert!(session.is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_send_appends_reply_in_order() {
        let relay = MockRelay::new(vec![Ok("Here is your routine".to_string())]);
        let mut session = ConversationSession::new();
        session.append_user("hi");

        let reply = session.send(&relay).await.unwrap();
        assert_eq!(reply, "Here is your routine");
        assert_eq!(session.len(), 3);
        assert_eq!(session.messages()[2], ChatMessage::assistant("Here is your routine"));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(relay.call_count(), 1);
    }

    #[tokio::test]
    async fn test_send_failure_leaves_log_unchanged() {
        let relay = MockRelay::new(vec![Err(RelayError::MalformedReply("no choices".to_string()))]);
        let mut session = ConversationSession::new();
        session.append_user("hi");
        let before = session.messages().to_vec();

        let result = session.send(&relay).await;
        assert!(matches!(result, Err(SessionError::Relay(_))));
        assert_eq!(session.messages(), &before[..]);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_send_while_awaiting_is_rejected() {
        let relay = MockRelay::new(vec![Ok("reply".to_string())]);
        let mut session = ConversationSession::new();
        session.append_user("hi");
        session.state = SessionState::AwaitingReply;

        let result = session.send(&relay).await;
        assert!(matches!(result, Err(SessionError::Busy)));
        assert_eq!(session.len(), 2);
        assert_eq!(relay.call_count(), 0);
    }
}
