//! Hard-wrapped layout of the draft.
//!
//! Lines break at `\n` and wherever the next character would overflow the
//! inner width, measured in terminal cells. Each visual row is a byte range
//! into the draft, so the cursor maps to a (row, col) without re-wrapping.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Left and right border.
pub const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top and bottom border.
pub const VERTICAL_OVERHEAD: u16 = 2;
/// Rows shown before the draft scrolls internally.
pub const MAX_VISIBLE_LINES: u16 = 5;

pub fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

pub struct DraftLayout {
    rows: Vec<Range<usize>>,
    width: u16,
    /// The last row is full, so a cursor at the very end sits on a row of its own
    trailing_row: bool,
}

impl DraftLayout {
    pub fn new(text: &str, width: u16) -> Self {
        let width = width.max(1);
        let mut rows = Vec::new();
        let mut start = 0;
        let mut used: u16 = 0;

        for (i, c) in text.char_indices() {
            if c == '\n' {
                rows.push(start..i);
                start = i + 1;
                used = 0;
                continue;
            }
            let w = c.width().unwrap_or(0) as u16;
            if used > 0 && used + w > width {
                rows.push(start..i);
                start = i;
                used = 0;
            }
            used += w;
        }
        rows.push(start..text.len());

        Self {
            rows,
            width,
            trailing_row: used >= width,
        }
    }

    pub fn line_count(&self) -> u16 {
        self.rows.len() as u16 + u16::from(self.trailing_row)
    }

    pub fn row<'t>(&self, text: &'t str, index: usize) -> &'t str {
        self.rows.get(index).map(|r| &text[r.clone()]).unwrap_or("")
    }

    /// Visual (row, col) of the byte offset `cursor`.
    pub fn cursor_position(&self, text: &str, cursor: usize) -> (u16, u16) {
        let row = self
            .rows
            .iter()
            .rposition(|r| r.start <= cursor)
            .unwrap_or(0);
        let start = self.rows[row].start;
        let col = text[start..cursor].width() as u16;
        if col >= self.width {
            (row as u16 + 1, 0)
        } else {
            (row as u16, col)
        }
    }

    /// Byte offset closest to `col` on `row`, for vertical cursor movement.
    pub fn offset_at(&self, text: &str, row: u16, col: u16) -> usize {
        let Some(range) = self.rows.get(row as usize) else {
            return text.len();
        };
        let mut used: u16 = 0;
        for (i, c) in text[range.clone()].char_indices() {
            let w = c.width().unwrap_or(0) as u16;
            if used + w > col {
                return range.start + i;
            }
            used += w;
        }
        range.end
    }

    /// First row to show so that `cursor_row` stays inside the visible window.
    pub fn scroll_for(&self, cursor_row: u16, current: u16) -> u16 {
        let max_scroll = self.line_count().saturating_sub(MAX_VISIBLE_LINES);
        let scroll = if cursor_row < current {
            cursor_row
        } else if cursor_row >= current + MAX_VISIBLE_LINES {
            cursor_row + 1 - MAX_VISIBLE_LINES
        } else {
            current
        };
        scroll.min(max_scroll)
    }
}
