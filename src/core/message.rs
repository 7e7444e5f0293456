//! # Message
//!
//! The single record type of a conversation. Messages are created once and
//! never edited; the placeholder shown while waiting for an answer is
//! removed and replaced, not rewritten.

use chrono::Local;
use uuid::Uuid;

/// Id of the greeting seeded into every fresh conversation.
pub const WELCOME_ID: &str = "welcome";

/// Greeting shown when the screen mounts.
pub const WELCOME_TEXT: &str = "Merhaba! Ben Hasan. Size nasıl yardımcı olabilirim?";

/// Text of the placeholder bubble while a request is outstanding.
pub const THINKING_TEXT: &str = "Düşünüyorum...";

/// Shown when the orchestrator hits an error it does not expect
/// (fetcher returned `Err` or its task panicked).
pub const UNEXPECTED_ERROR_TEXT: &str = "Şu anda cevap verilemiyor.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Opaque unique token. Used for list keys and placeholder tracking.
    pub id: String,
    pub text: String,
    pub is_user: bool,
    /// Wall-clock time at creation, formatted for display only.
    pub time: String,
    pub is_thinking: bool,
}

impl Message {
    fn build(id: String, text: String, is_user: bool, is_thinking: bool) -> Self {
        Self {
            id,
            text,
            is_user,
            time: timestamp(),
            is_thinking,
        }
    }

    pub fn welcome() -> Self {
        Self::build(WELCOME_ID.to_string(), WELCOME_TEXT.to_string(), false, false)
    }

    /// A message typed by the user. The text is stored exactly as typed.
    pub fn user(text: impl Into<String>) -> Self {
        Self::build(new_id(), text.into(), true, false)
    }

    /// A terminal answer (or fallback string) from the assistant.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::build(new_id(), text.into(), false, false)
    }

    pub fn thinking() -> Self {
        Self::build(
            format!("thinking-{}", Uuid::new_v4()),
            THINKING_TEXT.to_string(),
            false,
            true,
        )
    }

    pub fn error() -> Self {
        Self::build(
            format!("error-{}", Uuid::new_v4()),
            UNEXPECTED_ERROR_TEXT.to_string(),
            false,
            false,
        )
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Local time as `HH:MM:SS`.
fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
