//! RoutineBuilder - chat assistant for building beauty routines
//!
//! Drives a conversation with a remote chat relay about the user's selected
//! products: one flow seeds a fresh session and asks for a personalized
//! routine, the other appends follow-up questions to the running transcript.
//! The whole ordered message log is sent on every turn; nothing about the
//! conversation is persisted across process restarts.
//!
//! # Modules
//!
//! - [`chat`] - conversation session and message types
//! - [`relay`] - HTTP client for the remote chat relay
//! - [`assistant`] - routine-generation and follow-up flows
//! - [`repl`] - interactive chat loop
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod assistant;
pub mod chat;
pub mod cli;
pub mod config;
pub mod relay;
pub mod repl;

pub use assistant::ChatOutcome;
pub use chat::{ChatMessage, ConversationSession, Role, SessionError, SessionState};
pub use config::{Config, RelayConfig};
pub use relay::{RelayApi, RelayClient, RelayError};
