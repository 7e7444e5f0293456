use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::message::Message;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// The footer row under the text (timestamp or thinking caption).
const FOOTER_LINES: u16 = 1;
/// Blank row between consecutive bubbles.
const MESSAGE_SPACING: u16 = 1;
/// Bubbles never take more than this share of the list width (in percent).
const MAX_BUBBLE_PERCENT: u16 = 80;
/// Bubbles are at least this wide so the footer stays readable.
const MIN_BUBBLE_WIDTH: u16 = 16;

/// Label used for the user's own messages.
pub const USER_LABEL: &str = "Siz";
/// Caption next to the spinner on the thinking bubble.
pub const THINKING_CAPTION: &str = "Yanıt hazırlanıyor...";

pub(crate) const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Opacity below which nothing is drawn during the mount fade.
const FADE_HIDDEN_THRESHOLD: f32 = 0.15;
/// Opacity below which bubbles are drawn dimmed during the mount fade.
const FADE_DIM_THRESHOLD: f32 = 0.6;

/// Which of the three bubble forms a message takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Assistant,
    Thinking,
}

impl BubbleKind {
    pub fn of(message: &Message) -> Self {
        if message.is_user {
            BubbleKind::User
        } else if message.is_thinking {
            BubbleKind::Thinking
        } else {
            BubbleKind::Assistant
        }
    }

    fn style(self) -> Style {
        match self {
            BubbleKind::User => Style::default().fg(Color::White).bg(Color::Blue),
            BubbleKind::Assistant => Style::default().fg(Color::Reset),
            BubbleKind::Thinking => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        }
    }

    fn border_style(self) -> Style {
        match self {
            BubbleKind::User => Style::default().fg(Color::Blue),
            BubbleKind::Assistant | BubbleKind::Thinking => Style::default().fg(Color::Gray),
        }
    }
}

/// A stateless chat bubble.
///
/// User bubbles hug the right edge, assistant and thinking bubbles the left.
/// The footer shows `time • speaker`, or a spinner and caption while the
/// answer is pending.
///
/// Text is wrapped with `textwrap` and rendered line by line, so
/// [`calculate_height`](Self::calculate_height) always matches what is drawn.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    /// Speaker label for non-user messages
    pub assistant_name: &'a str,
    pub spinner_frame: usize,
    /// Mount fade progress, 0.0 (invisible) to 1.0 (fully shown)
    pub opacity: f32,
}

impl<'a> MessageBubble<'a> {
    pub fn new(
        message: &'a Message,
        assistant_name: &'a str,
        spinner_frame: usize,
        opacity: f32,
    ) -> Self {
        Self {
            message,
            assistant_name,
            spinner_frame,
            opacity,
        }
    }

    /// Rows this message occupies in a list of the given width, spacing included.
    pub fn calculate_height(message: &Message, assistant_name: &str, width: u16) -> u16 {
        let bubble_width = bubble_width(message, assistant_name, width);
        let text_width = bubble_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if text_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let lines = wrap_text(&message.text, text_width).len() as u16;
        lines + FOOTER_LINES + VERTICAL_OVERHEAD + MESSAGE_SPACING
    }

    fn footer(&self) -> Line<'static> {
        if self.message.is_thinking {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            return Line::from(vec![
                Span::styled(spinner, Style::default().fg(Color::Blue)),
                Span::raw(" "),
                Span::styled(THINKING_CAPTION, Style::default().fg(Color::Blue)),
            ]);
        }
        Line::from(Span::styled(
            footer_text(self.message, self.assistant_name),
            Style::default().fg(Color::DarkGray),
        ))
    }
}

fn speaker<'a>(message: &Message, assistant_name: &'a str) -> &'a str {
    if message.is_user { USER_LABEL } else { assistant_name }
}

fn footer_text(message: &Message, assistant_name: &str) -> String {
    format!("{} • {}", message.time, speaker(message, assistant_name))
}

/// Widest line the footer can need, in columns.
fn footer_width(message: &Message, assistant_name: &str) -> usize {
    if message.is_thinking {
        // spinner + space + caption
        2 + THINKING_CAPTION.width()
    } else {
        footer_text(message, assistant_name).width()
    }
}

/// Width of the bubble (borders included) for a list of width `width`.
fn bubble_width(message: &Message, assistant_name: &str, width: u16) -> u16 {
    let share = (u32::from(width) * u32::from(MAX_BUBBLE_PERCENT) / 100) as u16;
    let max_width = share.max(MIN_BUBBLE_WIDTH).min(width);
    let widest_line = message
        .text
        .lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
        .max(footer_width(message, assistant_name));
    let wanted = (widest_line as u16).saturating_add(HORIZONTAL_OVERHEAD);
    wanted.min(max_width)
}

fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity < FADE_HIDDEN_THRESHOLD {
            return;
        }

        let kind = BubbleKind::of(self.message);
        let width = bubble_width(self.message, self.assistant_name, area.width);
        let height = area.height.saturating_sub(MESSAGE_SPACING);
        let x = match kind {
            BubbleKind::User => area.x + area.width.saturating_sub(width),
            BubbleKind::Assistant | BubbleKind::Thinking => area.x,
        };
        let bubble_area = Rect::new(x, area.y, width, height);

        let mut style = kind.style();
        let mut border_style = kind.border_style();
        if self.opacity < FADE_DIM_THRESHOLD {
            style = style.add_modifier(Modifier::DIM);
            border_style = border_style.add_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble_area);
        block.render(bubble_area, buf);

        let mut lines: Vec<Line> = wrap_text(&self.message.text, inner.width)
            .into_iter()
            .map(Line::from)
            .collect();
        lines.push(self.footer());

        Paragraph::new(lines).style(style).render(inner, buf);
    }
}

/// `MessageBubble` is stateless; the trait impl delegates to [`Widget`].
impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn message(text: &str, is_user: bool, is_thinking: bool) -> Message {
        Message {
            id: "id".to_string(),
            text: text.to_string(),
            is_user,
            time: "12:34:56".to_string(),
            is_thinking,
        }
    }

    fn render_to_string(msg: &Message, width: u16) -> Vec<String> {
        let height = MessageBubble::calculate_height(msg, "Hasan", width);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut bubble = MessageBubble::new(msg, "Hasan", 0, 1.0);
                Component::render(&mut bubble, f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn bubble_kind_covers_three_forms() {
        assert_eq!(BubbleKind::of(&message("a", true, false)), BubbleKind::User);
        assert_eq!(BubbleKind::of(&message("a", false, false)), BubbleKind::Assistant);
        assert_eq!(BubbleKind::of(&message("a", false, true)), BubbleKind::Thinking);
    }

    #[test]
    fn calculate_height_single_line() {
        let msg = message("Hello", false, false);
        // 1 text + 1 footer + 2 borders + 1 spacing
        assert_eq!(MessageBubble::calculate_height(&msg, "Hasan", 80), 5);
    }

    #[test]
    fn calculate_height_counts_explicit_newlines() {
        let msg = message("one\ntwo\nthree", true, false);
        assert_eq!(MessageBubble::calculate_height(&msg, "Hasan", 80), 7);
    }

    #[test]
    fn calculate_height_wraps_long_text() {
        // Width 20 → bubble 16 → text width 12
        let msg = message("aaaa bbbb cccc dddd", false, false);
        assert_eq!(MessageBubble::calculate_height(&msg, "Hasan", 20), 2 + 4);
    }

    #[test]
    fn calculate_height_empty_text_keeps_one_line() {
        let msg = message("", false, false);
        assert_eq!(MessageBubble::calculate_height(&msg, "Hasan", 80), 5);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let msg = message("Hello", false, false);
        assert_eq!(MessageBubble::calculate_height(&msg, "Hasan", 0), 1);
    }

    #[test]
    fn user_bubble_is_right_aligned() {
        let rows = render_to_string(&message("Hi", true, false), 60);
        // Top border starts past the middle and ends at the right edge.
        let top = &rows[0];
        let first_border = top.chars().position(|c| c == '╭').unwrap();
        assert!(first_border > 30, "row: {top:?}");
        assert!(top.trim_end().ends_with('╮'));
        assert!(rows.iter().any(|r| r.contains("12:34:56 • Siz")));
    }

    #[test]
    fn assistant_bubble_is_left_aligned_with_name() {
        let rows = render_to_string(&message("Merhaba", false, false), 60);
        assert!(rows[0].starts_with('╭'));
        assert!(rows.iter().any(|r| r.contains("Merhaba")));
        assert!(rows.iter().any(|r| r.contains("12:34:56 • Hasan")));
    }

    #[test]
    fn thinking_bubble_shows_spinner_and_caption() {
        let rows = render_to_string(&message("Düşünüyorum...", false, true), 60);
        assert!(rows.iter().any(|r| r.contains(THINKING_CAPTION)));
        assert!(rows.iter().any(|r| r.contains(SPINNER_FRAMES[0])));
        assert!(!rows.iter().any(|r| r.contains("12:34:56")));
    }

    #[test]
    fn invisible_during_early_fade() {
        let msg = message("Hi", false, false);
        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(MessageBubble::new(&msg, "Hasan", 0, 0.0), f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.trim().is_empty());
    }
}
