//! Draft text with a byte-offset cursor and a character cap.

/// Longest draft the input bar accepts, in characters.
pub const MAX_DRAFT_CHARS: usize = 1000;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    text: String,
    /// Byte offset, always on a char boundary
    cursor: usize,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the draft holds something other than whitespace.
    pub fn is_sendable(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Inserts as much of `s` as fits under the cap. Returns true if anything was inserted.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let room = MAX_DRAFT_CHARS.saturating_sub(self.char_count());
        let end = s
            .char_indices()
            .nth(room)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let accepted = &s[..end];
        if accepted.is_empty() {
            return false;
        }
        self.text.insert_str(self.cursor, accepted);
        self.cursor += accepted.len();
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf))
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = self.next_boundary();
        self.text.drain(self.cursor..next);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.set_cursor(self.prev_boundary())
    }

    pub fn move_right(&mut self) -> bool {
        self.set_cursor(self.next_boundary())
    }

    /// Start of the current logical line.
    pub fn move_home(&mut self) -> bool {
        let line_start = self.text[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        self.set_cursor(line_start)
    }

    /// End of the current logical line.
    pub fn move_end(&mut self) -> bool {
        let line_end = self.text[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.text.len());
        self.set_cursor(line_end)
    }

    /// Moves to `offset` if it is a valid boundary. Returns true if the cursor moved.
    pub fn set_cursor(&mut self, offset: usize) -> bool {
        let offset = offset.min(self.text.len());
        if offset == self.cursor || !self.text.is_char_boundary(offset) {
            return false;
        }
        self.cursor = offset;
        true
    }

    /// Empties the draft, returning its text exactly as typed.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }
}
