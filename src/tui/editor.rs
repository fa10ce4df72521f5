//! Text editing buffers used by the forms and the quick-add prompt.
//!
//! Cursors are byte offsets kept on grapheme boundaries. Length limits
//! count chars, matching the store's validation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{
    display_col, next_grapheme_boundary, offset_at_col, prev_grapheme_boundary,
};

/// Single-line input. Pasted newlines and tabs become spaces.
#[derive(Debug, Clone, Default)]
pub struct LineInput {
    text: String,
    cursor: usize,
    limit: Option<usize>,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        LineInput {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Replace the content and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.cursor = 0;
        self.insert_str(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn insert_str(&mut self, s: &str) {
        let flat: String = s
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
            .collect();
        let fitted = fit_to_limit(&flat, self.text.chars().count(), self.limit);
        self.text.insert_str(self.cursor, fitted);
        self.cursor += fitted.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Delete everything before the cursor
    pub fn kill_to_start(&mut self) {
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false for keys the input does not use,
    /// so the caller can treat them as commands.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => self.move_home(),
            (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => self.move_end(),
            (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => self.kill_to_start(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert_char(c),
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete_forward(),
            (_, KeyCode::Left) => self.move_left(),
            (_, KeyCode::Right) => self.move_right(),
            (_, KeyCode::Home) => self.move_home(),
            (_, KeyCode::End) => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// Multi-line input
#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    /// Byte offset within `lines[row]`
    col: usize,
    limit: Option<usize>,
}

impl Default for TextArea {
    fn default() -> Self {
        TextArea {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            limit: None,
        }
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        TextArea {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
        self.insert_str(text);
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// (row, byte offset in row)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn char_count(&self) -> usize {
        // Newlines count toward the limit like any other char
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>() + self.lines.len() - 1
    }

    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace("\r\n", "\n").replace('\r', "\n");
        let fitted = fit_to_limit(&clean, self.char_count(), self.limit).to_string();
        let mut parts = fitted.split('\n');
        let Some(first) = parts.next() else {
            return;
        };
        let tail = self.lines[self.row].split_off(self.col);
        self.lines[self.row].push_str(first);
        self.col += first.len();
        for part in parts {
            self.row += 1;
            self.lines.insert(self.row, part.to_string());
            self.col = part.len();
        }
        self.lines[self.row].push_str(&tail);
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    pub fn backspace(&mut self) {
        let line = &mut self.lines[self.row];
        if let Some(prev) = prev_grapheme_boundary(line, self.col) {
            line.replace_range(prev..self.col, "");
            self.col = prev;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].len();
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete_forward(&mut self) {
        let line = &mut self.lines[self.row];
        if let Some(next) = next_grapheme_boundary(line, self.col) {
            line.replace_range(self.col..next, "");
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.lines[self.row], self.col) {
            self.col = prev;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.lines[self.row].len();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.lines[self.row], self.col) {
            self.col = next;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.move_to_row(self.row - 1);
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.move_to_row(self.row + 1);
        }
    }

    /// Keep the display column when changing rows
    fn move_to_row(&mut self, row: usize) {
        let col = display_col(&self.lines[self.row], self.col);
        self.row = row;
        self.col = offset_at_col(&self.lines[row], col);
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.lines[self.row].len();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => self.move_home(),
            (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => self.move_end(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert_char(c),
            (_, KeyCode::Enter) => self.insert_newline(),
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete_forward(),
            (_, KeyCode::Left) => self.move_left(),
            (_, KeyCode::Right) => self.move_right(),
            (_, KeyCode::Up) => self.move_up(),
            (_, KeyCode::Down) => self.move_down(),
            (_, KeyCode::Home) => self.move_home(),
            (_, KeyCode::End) => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// Longest prefix of `s` that keeps the total within `limit` chars
fn fit_to_limit(s: &str, current: usize, limit: Option<usize>) -> &str {
    let Some(limit) = limit else {
        return s;
    };
    let room = limit.saturating_sub(current);
    match s.char_indices().nth(room) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    // --- LineInput ---

    #[test]
    fn test_line_insert_and_backspace_unicode() {
        let mut input = LineInput::new();
        input.insert_str("ab");
        input.insert_char('λ');
        assert_eq!(input.text(), "abλ");
        input.backspace();
        assert_eq!(input.text(), "ab");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_line_flattens_newlines() {
        let mut input = LineInput::new();
        input.insert_str("a\nb\tc\r\n");
        assert_eq!(input.text(), "a b c ");
    }

    #[test]
    fn test_line_limit_counts_chars() {
        let mut input = LineInput::with_limit(3);
        input.insert_str("éééé");
        assert_eq!(input.text(), "ééé");
        input.insert_char('x');
        assert_eq!(input.text(), "ééé");
    }

    #[test]
    fn test_line_cursor_keys() {
        let mut input = LineInput::new();
        input.set_text("hello");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('X')));
        assert_eq!(input.text(), "helXlo");
        input.handle_key(ctrl('u'));
        assert_eq!(input.text(), "lo");
        input.handle_key(key(KeyCode::End));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.text(), "lo");
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert!(!input.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_line_combining_mark_deleted_with_base() {
        let mut input = LineInput::new();
        input.set_text("cafe\u{0301}");
        input.backspace();
        assert_eq!(input.text(), "caf");
    }

    // --- TextArea ---

    #[test]
    fn test_area_newline_splits_line() {
        let mut area = TextArea::new();
        area.set_text("hello world");
        for _ in 0..6 {
            area.move_left();
        }
        area.insert_newline();
        assert_eq!(area.lines(), &["hello".to_string(), " world".to_string()]);
        assert_eq!(area.cursor(), (1, 0));
    }

    #[test]
    fn test_area_backspace_joins_lines() {
        let mut area = TextArea::new();
        area.set_text("ab\ncd");
        area.move_home();
        area.backspace();
        assert_eq!(area.text(), "abcd");
        assert_eq!(area.cursor(), (0, 2));
    }

    #[test]
    fn test_area_set_text_places_cursor_at_end() {
        let mut area = TextArea::new();
        area.set_text("one\ntwo\nthree");
        assert_eq!(area.cursor(), (2, 5));
        area.move_up();
        assert_eq!(area.cursor(), (1, 3));
    }

    #[test]
    fn test_area_delete_forward_at_line_end_joins() {
        let mut area = TextArea::new();
        area.set_text("ab\ncd");
        area.move_up();
        area.move_end();
        area.delete_forward();
        assert_eq!(area.text(), "abcd");
    }

    #[test]
    fn test_area_enter_is_handled() {
        let mut area = TextArea::new();
        assert!(area.handle_key(key(KeyCode::Enter)));
        assert_eq!(area.lines().len(), 2);
        assert!(!area.handle_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_area_limit_includes_newlines() {
        let mut area = TextArea::with_limit(4);
        area.set_text("ab\ncdef");
        assert_eq!(area.text(), "ab\nc");
    }
}
