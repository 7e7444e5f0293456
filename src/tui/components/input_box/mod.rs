//! # InputBox Component
//!
//! The draft field at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input, capped at `MAX_DRAFT_CHARS`
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter) when the trimmed draft is non-empty
//! - Render dimmed and ignore input while a request is outstanding
//!
//! ## State Management
//!
//! The draft is internal state. `disabled` is a prop copied from
//! `App::is_loading` before each frame, and `spinner_frame` drives the
//! busy glyph that replaces the send hint while disabled.

mod draft;
mod layout;

pub use draft::{Draft, MAX_DRAFT_CHARS};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::SPINNER_FRAMES;
use crate::tui::event::TuiEvent;

use layout::{DraftLayout, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width};

pub const PLACEHOLDER: &str = "Bana soru sor";
const SEND_HINT: &str = " Enter: gönder · Ctrl+J: yeni satır ";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the draft, exactly as typed
    Submit(String),
    /// Draft text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    draft: Draft,
    /// Prop: true while a fetch is outstanding
    pub disabled: bool,
    /// Prop: spinner tick shown in the hint while disabled
    pub spinner_frame: usize,
    /// First visible wrapped row
    scroll_offset: u16,
    /// Area width from the last render, needed for vertical movement
    last_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            draft: Draft::new(),
            disabled: false,
            spinner_frame: 0,
            scroll_offset: 0,
            last_width: 0,
        }
    }

    pub fn text(&self) -> &str {
        self.draft.text()
    }

    /// Whether Enter would currently send.
    pub fn can_submit(&self) -> bool {
        !self.disabled && self.draft.is_sendable()
    }

    /// Height for the current draft, between one and `MAX_VISIBLE_LINES` rows plus borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let layout = DraftLayout::new(self.draft.text(), inner_width(area_width));
        layout.line_count().min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn move_vertically(&mut self, delta: i32) -> bool {
        let text = self.draft.text();
        let layout = DraftLayout::new(text, inner_width(self.last_width));
        let (row, col) = layout.cursor_position(text, self.draft.cursor());
        let target = row as i32 + delta;
        if target < 0 || target >= layout.line_count() as i32 {
            return false;
        }
        let offset = layout.offset_at(text, target as u16, col);
        self.draft.set_cursor(offset)
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, total_lines: u16) {
        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);
        let mut state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.scroll_offset as usize);
        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_width = area.width;
        let text = self.draft.text();
        let layout = DraftLayout::new(text, inner_width(area.width));
        let (cursor_row, cursor_col) = layout.cursor_position(text, self.draft.cursor());
        self.scroll_offset = layout.scroll_for(cursor_row, self.scroll_offset);

        let (border, body, hint) = if self.disabled {
            let dim = Style::default().fg(Color::DarkGray);
            (dim, dim.add_modifier(Modifier::DIM), dim)
        } else {
            let hint = if self.draft.is_sendable() {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            (Style::default().fg(Color::Gray), Style::default().fg(Color::White), hint)
        };

        let hint_text = if self.disabled {
            format!(" {} ", SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()])
        } else {
            SEND_HINT.to_string()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title_bottom(Line::from(Span::styled(hint_text, hint)).right_aligned());

        let lines: Vec<Line> = if self.draft.is_empty() {
            vec![Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))]
        } else {
            let end = (self.scroll_offset + MAX_VISIBLE_LINES).min(layout.line_count());
            (self.scroll_offset..end)
                .map(|row| Line::from(layout.row(text, row as usize)))
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).style(body).block(block), area);
        self.render_scrollbar(frame, area, layout.line_count());

        if !self.disabled {
            let x = area.x + 1 + cursor_col;
            let y = area.y + 1 + cursor_row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        let changed = match event {
            TuiEvent::InputChar(c) => self.draft.insert_char(*c),
            TuiEvent::Paste(text) => self.draft.insert_str(text),
            TuiEvent::Backspace => self.draft.backspace(),
            TuiEvent::Delete => self.draft.delete(),
            TuiEvent::CursorLeft => self.draft.move_left(),
            TuiEvent::CursorRight => self.draft.move_right(),
            TuiEvent::CursorHome => self.draft.move_home(),
            TuiEvent::CursorEnd => self.draft.move_end(),
            TuiEvent::CursorUp => self.move_vertically(-1),
            TuiEvent::CursorDown => self.move_vertically(1),
            TuiEvent::Submit => {
                if !self.draft.is_sendable() {
                    return None;
                }
                self.scroll_offset = 0;
                return Some(InputEvent::Submit(self.draft.take()));
            }
            _ => false,
        };
        changed.then_some(InputEvent::ContentChanged)
    }
}
