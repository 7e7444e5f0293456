//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Send Flow
//!
//! `update()` returns `Effect::SpawnFetch` for an accepted submit. The fetch
//! runs on a tokio task and reports back through an `mpsc` channel that the
//! event loop drains between frames:
//!
//! ```text
//! Enter ─▶ Action::Submit ─▶ update ─▶ Effect::SpawnFetch ─▶ spawn_fetch
//!                                                             │
//!   update ◀── Action::AnswerReady / FetchFailed ◀── channel ◀┘
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Animating** (mount fade, thinking spinner): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background actions.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{AnswerFetcher, GeminiProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::fade::FadeIn;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Mount fade, started when the screen appears
    pub fade: Option<FadeIn>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            fade: None,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.fade.map_or(1.0, |fade| fade.opacity())
    }

    fn is_fading(&self) -> bool {
        self.fade.is_some_and(|fade| fade.is_running())
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals without support ignore the escape sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBar,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the answer fetcher from resolved config.
pub fn build_fetcher(config: &ResolvedConfig) -> Arc<dyn AnswerFetcher> {
    Arc::new(
        GeminiProvider::new(config.api_key.clone(), Some(config.base_url.clone()))
            .with_model(config.model_name.clone())
            .with_generation_config(config.generation),
    )
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let fetcher = build_fetcher(&config);
    let mut app = App::from_config(fetcher, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    dispatch(&mut app, Action::Mount, &tx);
    tui.fade = Some(FadeIn::start());

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.input_box.disabled = app.is_loading;

        let animating = app.is_loading || tui.is_fading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(|| poll_event(Duration::ZERO)))
        {
            if handle_tui_event(&mut app, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(&mut app, action, &tx);
        }
    }

    // Outstanding fetches keep running; their results are dropped with `rx`.
    if app.is_loading {
        info!("Quitting with a fetch still outstanding");
    }

    ratatui::restore();
    Ok(())
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_tui_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    tui.input_box.disabled = app.is_loading;
    match event {
        // Resize just needs a redraw (already flagged by the caller)
        TuiEvent::Resize => false,
        TuiEvent::Quit => dispatch(app, Action::Unmount, tx),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            false
        }
        // Up/Down move within a multi-line draft, otherwise they scroll
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            if tui.input_box.handle_event(&event).is_none() {
                let scroll = if event == TuiEvent::CursorUp {
                    TuiEvent::ScrollUp
                } else {
                    TuiEvent::ScrollDown
                };
                tui.message_list.handle_event(&scroll);
            }
            false
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => dispatch(app, Action::Submit(text), tx),
            Some(InputEvent::ContentChanged) | None => false,
        },
    }
}

/// Apply `action` and carry out its effect. Returns true on `Effect::Quit`.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::SpawnFetch {
            prompt,
            placeholder_id,
        } => {
            spawn_fetch(app.fetcher.clone(), prompt, placeholder_id, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

/// Run one fetch to completion and report its outcome.
///
/// The fetch itself runs on an inner task so that a panic inside the
/// fetcher surfaces as a `JoinError` and still settles the placeholder.
fn spawn_fetch(
    fetcher: Arc<dyn AnswerFetcher>,
    prompt: String,
    placeholder_id: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning fetch via {} (placeholder={})", fetcher.name(), placeholder_id);

    tokio::spawn(async move {
        let request_start = Instant::now();
        let fetch = tokio::spawn(async move { fetcher.fetch_answer(&prompt).await });

        let action = match fetch.await {
            Ok(Ok(answer)) => {
                debug!(
                    "Fetch for {} finished in {}ms ({} bytes)",
                    placeholder_id,
                    request_start.elapsed().as_millis(),
                    answer.len()
                );
                Action::AnswerReady {
                    placeholder_id: placeholder_id.clone(),
                    answer,
                }
            }
            Ok(Err(e)) => Action::FetchFailed {
                placeholder_id: placeholder_id.clone(),
                reason: e.to_string(),
            },
            Err(join_error) => Action::FetchFailed {
                placeholder_id: placeholder_id.clone(),
                reason: format!("fetch task failed: {}", join_error),
            },
        };

        if tx.send(action).is_err() {
            warn!(
                "Failed to deliver fetch result for {}: receiver dropped",
                placeholder_id
            );
        }
    })
}
