//! # Application State
//!
//! Core business state for Hasan. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── fetcher: Arc<dyn AnswerFetcher>  // remote answer source
//! ├── conversation: Conversation       // message sequence
//! ├── model_name: String               // current model
//! ├── assistant_name: String           // speaker label for answers
//! ├── status_message: String           // header status line
//! ├── is_loading: bool                 // a fetch is outstanding
//! ├── pending: Option<PendingFetch>    // placeholder awaiting its answer
//! └── mounted: bool                    // screen is alive
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::{DEFAULT_ASSISTANT_NAME, ResolvedConfig};
use crate::core::conversation::Conversation;
use crate::inference::AnswerFetcher;

pub const STATUS_ONLINE: &str = "🟢 Çevrimiçi";
pub const STATUS_THINKING: &str = "🟡 Yazıyor...";

/// The single outstanding request, tracked by the id of its placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub placeholder_id: String,
}

pub struct App {
    pub fetcher: Arc<dyn AnswerFetcher>,
    pub conversation: Conversation,
    pub model_name: String,
    pub assistant_name: String,
    pub status_message: String,
    pub is_loading: bool,
    pub pending: Option<PendingFetch>,
    /// False before `Action::Mount` and after `Action::Unmount`.
    /// Settle actions are ignored while false.
    pub mounted: bool,
}

impl App {
    pub fn new(fetcher: Arc<dyn AnswerFetcher>, model_name: String) -> Self {
        Self {
            fetcher,
            conversation: Conversation::new(),
            model_name,
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            status_message: String::from(STATUS_ONLINE),
            is_loading: false,
            pending: None,
            mounted: false,
        }
    }

    pub fn from_config(fetcher: Arc<dyn AnswerFetcher>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(fetcher, config.model_name.clone());
        app.assistant_name = config.assistant_name.clone();
        app
    }
}
