//! # Actions
//!
//! Everything that can happen in Hasan becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The answer arrives? That's `Action::AnswerReady { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect` the
//! adapter must carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! The send flow is a two-state machine:
//!
//! ```text
//!            Submit(non-blank)                 AnswerReady / FetchFailed
//!   idle ─────────────────────▶ awaiting ─────────────────────────────▶ idle
//!    │ Submit(blank): no-op        │ Submit: ignored (coalesced)
//! ```

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::{App, PendingFetch, STATUS_ONLINE, STATUS_THINKING};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The screen appeared. Seeds the conversation with the welcome message.
    Mount,
    /// The user asked to send the draft, exactly as typed.
    Submit(String),
    /// The fetch for `placeholder_id` returned text (an answer or a fallback string).
    AnswerReady {
        placeholder_id: String,
        answer: String,
    },
    /// The fetch for `placeholder_id` failed in a way the fetcher did not absorb.
    FetchFailed {
        placeholder_id: String,
        reason: String,
    },
    /// The screen is going away.
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start exactly one fetch for `prompt`; report back with `placeholder_id`.
    SpawnFetch {
        prompt: String,
        placeholder_id: String,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount => {
            app.conversation.reset_with_welcome();
            app.is_loading = false;
            app.pending = None;
            app.mounted = true;
            app.status_message = STATUS_ONLINE.to_string();
            info!("Conversation mounted");
            Effect::None
        }
        Action::Submit(text) => submit(app, text),
        Action::AnswerReady {
            placeholder_id,
            answer,
        } => {
            settle(app, &placeholder_id, Message::assistant(answer));
            Effect::None
        }
        Action::FetchFailed {
            placeholder_id,
            reason,
        } => {
            warn!("Fetch for {} failed unexpectedly: {}", placeholder_id, reason);
            settle(app, &placeholder_id, Message::error());
            Effect::None
        }
        Action::Unmount => {
            app.mounted = false;
            info!("Conversation unmounted");
            Effect::Quit
        }
    }
}

fn submit(app: &mut App, text: String) -> Effect {
    if app.is_loading {
        debug!("Submit ignored: a request is already outstanding");
        return Effect::None;
    }
    if text.trim().is_empty() {
        return Effect::None;
    }

    let placeholder = Message::thinking();
    let placeholder_id = placeholder.id.clone();

    app.conversation.push(Message::user(text.clone()));
    app.conversation.push(placeholder);
    app.pending = Some(PendingFetch {
        placeholder_id: placeholder_id.clone(),
    });
    app.is_loading = true;
    app.status_message = STATUS_THINKING.to_string();

    info!("Submitted prompt ({} bytes)", text.len());
    Effect::SpawnFetch {
        prompt: text,
        placeholder_id,
    }
}

/// Swaps the pending placeholder for `result` and returns to idle.
/// Late or unknown completions are dropped.
fn settle(app: &mut App, placeholder_id: &str, result: Message) {
    if !app.mounted {
        debug!("Dropping completion for {}: screen unmounted", placeholder_id);
        return;
    }
    let is_pending = app
        .pending
        .as_ref()
        .is_some_and(|p| p.placeholder_id == placeholder_id);
    if !is_pending {
        warn!("Dropping completion for unknown placeholder {}", placeholder_id);
        return;
    }

    app.conversation.remove(placeholder_id);
    app.conversation.push(result);
    app.pending = None;
    app.is_loading = false;
    app.status_message = STATUS_ONLINE.to_string();
}
