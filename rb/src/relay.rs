//! HTTP client for the remote chat relay
//!
//! The relay is a single POST endpoint brokering chat completions. It
//! accepts `{model, messages}` and answers with the OpenAI-style
//! `{choices: [{message: {content}}]}` shape; only `choices[0]` is consumed
//! and anything else is treated as failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::chat::ChatMessage;
use crate::config::RelayConfig;

/// Errors from a relay round-trip
#[derive(Debug, Error)]
pub enum RelayError {
    /// Transport failure or an unparseable response body
    #[error("Relay request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The response parsed but did not carry a usable reply
    #[error("Malformed relay reply: {0}")]
    MalformedReply(String),
}

/// One-shot, non-streaming chat completion against the relay
#[async_trait]
pub trait RelayApi: Send + Sync {
    /// Send the ordered message log and return the single reply text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RelayError>;
}

/// The production relay client
///
/// No timeout is configured: a turn is awaited to completion, matching the
/// one-request-at-a-time session contract.
pub struct RelayClient {
    endpoint: String,
    model: String,
    http: Client,
}

impl RelayClient {
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            http: Client::new(),
        }
    }

    /// Build the request body for the relay
    fn build_request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": messages,
        })
    }
}

#[async_trait]
impl RelayApi for RelayClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, RelayError> {
        debug!(%self.model, count = messages.len(), "complete: posting to relay");
        let body = self.build_request_body(messages);

        let response = self.http.post(&self.endpoint).json(&body).send().await?;
        let reply: RelayReply = response.json().await?;

        reply_content(reply)
    }
}

/// Extract `choices[0].message.content`; any other shape is a failure
fn reply_content(reply: RelayReply) -> Result<String, RelayError> {
    reply
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| RelayError::MalformedReply("missing choices[0].message.content".to_string()))
}

// Relay response types

#[derive(Debug, Deserialize)]
struct RelayReply {
    #[serde(default)]
    choices: Vec<RelayChoice>,
}

#[derive(Debug, Deserialize)]
struct RelayChoice {
    message: Option<RelayReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct RelayReplyMessage {
    content: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    fn parse(json: &str) -> RelayReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_reply_content_happy_path() {
        let reply = parse(r#"{"choices": [{"message": {"content": "Use the cleanser first."}}]}"#);
        assert_eq!(reply_content(reply).unwrap(), "Use the cleanser first.");
    }

    #[test]
    fn test_only_first_choice_is_consumed() {
        let reply = parse(
            r#"{"choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]}"#,
        );
        assert_eq!(reply_content(reply).unwrap(), "first");
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let reply = parse(r#"{"choices": []}"#);
        assert!(matches!(reply_content(reply), Err(RelayError::MalformedReply(_))));
    }

    #[test]
    fn test_missing_choices_key_is_malformed() {
        let reply = parse(r#"{"error": "overloaded"}"#);
        assert!(matches!(reply_content(reply), Err(RelayError::MalformedReply(_))));
    }

    #[test]
    fn test_null_content_is_malformed() {
        let reply = parse(r#"{"choices": [{"message": {"content": null}}]}"#);
        assert!(matches!(reply_content(reply), Err(RelayError::MalformedReply(_))));

        let reply = parse(r#"{"choices": [{"message": null}]}"#);
        assert!(matches!(reply_content(reply), Err(RelayError::MalformedReply(_))));
    }

    #[test]
    fn test_build_request_body() {
        let client = RelayClient::from_config(&RelayConfig {
            endpoint: "https://relay.example".to_string(),
            model: "gpt-4o".to_string(),
        });

        let messages = vec![ChatMessage::system("context"), ChatMessage::user("hi")];
        let body = client.build_request_body(&messages);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "context");
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        for (role, expected) in [
            (Role::System, "\"system\""),
            (Role::User, "\"user\""),
            (Role::Assistant, "\"assistant\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), expected);
        }
    }
}
