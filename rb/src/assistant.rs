//! Routine-generation and follow-up flows
//!
//! Wraps the conversation session and relay into the two user-facing
//! operations: start a new routine conversation from the selected products,
//! and ask a follow-up question on the running transcript. Relay failures
//! never reach the transcript; they become fixed user-visible notices.

use productshelf::Product;
use tracing::info;

use crate::chat::{ConversationSession, SessionError};
use crate::relay::{RelayApi, RelayError};

/// System prompt for a fresh routine conversation
pub const ROUTINE_SYSTEM_PROMPT: &str = "You are a helpful beauty routine assistant. \
     Suggest a routine using the selected products. \
     Be friendly and explain why each product is included.";

/// Notice when the relay cannot be reached or its body cannot be read
pub const RELAY_DOWN_TEXT: &str = "Error connecting to the routine generator. Please try again.";

/// Notice when the relay answered with an unusable shape
pub const BAD_REPLY_TEXT: &str = "Sorry, something went wrong. Please try again.";

/// Notice when generating a routine with nothing selected
pub const NO_SELECTION_TEXT: &str = "Please select at least one product to generate a routine.";

/// Notice when a turn is attempted while one is already in flight
pub const BUSY_TEXT: &str = "A request is already in progress. Please wait for the current reply.";

/// Outcome of one user-facing turn
#[derive(Debug, PartialEq)]
pub enum ChatOutcome {
    /// The assistant's reply, appended to the session
    Reply(String),
    /// A locally-synthesized message; never part of the transcript
    Notice(String),
    /// Blank input, nothing happened
    Ignored,
}

/// The user prompt listing the selected products
pub fn routine_request(products: &[Product]) -> String {
    let listing = products
        .iter()
        .map(|p| format!("{} ({})", p.name, p.brand))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Here are my selected products:\n{}", listing)
}

fn notice_for(err: SessionError) -> ChatOutcome {
    let text = match err {
        SessionError::Busy => BUSY_TEXT,
        SessionError::Relay(RelayError::Network(_)) => RELAY_DOWN_TEXT,
        SessionError::Relay(RelayError::MalformedReply(_)) => BAD_REPLY_TEXT,
    };
    ChatOutcome::Notice(text.to_string())
}

/// Start a new routine conversation from the selected products
///
/// Resets the session and seeds it with the routine prompt before sending.
/// An empty selection leaves the session untouched.
pub async fn generate_routine(
    session: &mut ConversationSession,
    relay: &dyn RelayApi,
    products: &[Product],
) -> ChatOutcome {
    if products.is_empty() {
        return ChatOutcome::Notice(NO_SELECTION_TEXT.to_string());
    }

    info!(products = products.len(), "Generating routine");
    session.seed(ROUTINE_SYSTEM_PROMPT, routine_request(products));

    match session.send(relay).await {
        Ok(reply) => ChatOutcome::Reply(reply),
        Err(e) => notice_for(e),
    }
}

/// Ask a follow-up question on the running conversation
///
/// Blank input is ignored. On failure the user message stays in the log so
/// the turn can be retried.
pub async fn follow_up(session: &mut ConversationSession, relay: &dyn RelayApi, text: &str) -> ChatOutcome {
    if !session.append_user(text) {
        return ChatOutcome::Ignored;
    }

    match session.send(relay).await {
        Ok(reply) => ChatOutcome::Reply(reply),
        Err(e) => notice_for(e),
    }
}
