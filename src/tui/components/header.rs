//! # Header Component
//!
//! Top bar with the assistant's name and a status line.
//!
//! Stateless: all data arrives as props, so the header can be rendered and
//! tested without the rest of the app.
//!
//! ```text
//! Hasan                                   gemini-2.0-flash
//! 🟢 Çevrimiçi
//! ────────────────────────────────────────────────────────
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Two text rows plus the bottom border.
pub const HEADER_HEIGHT: u16 = 3;

pub struct Header {
    pub assistant_name: String,
    pub status_message: String,
    pub model_name: String,
}

impl Header {
    pub fn new(assistant_name: String, status_message: String, model_name: String) -> Self {
        Self {
            assistant_name,
            status_message,
            model_name,
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let left = Paragraph::new(vec![
            Line::from(Span::styled(
                self.assistant_name.as_str(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::Green),
            )),
        ]);
        frame.render_widget(left, inner);

        let right = Paragraph::new(Span::styled(
            self.model_name.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(right, inner);
    }
}
