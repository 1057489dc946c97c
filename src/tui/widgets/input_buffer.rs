//! Single-line text input with a byte-offset cursor.
//!
//! Shared by the question box and the path prompt.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::tui::theme;

#[derive(Debug, Default, Clone)]
pub struct InputBuffer {
    content: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let content = text.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    /// Apply an editing key. Returns false for keys that are not edits.
    pub fn apply_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (modifiers, code) {
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete(),
            (_, KeyCode::Left) => self.move_left(),
            (_, KeyCode::Right) => self.move_right(),
            (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                self.cursor = 0
            }
            (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
                self.cursor = self.content.len()
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.clear(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert_char(c),
            _ => return false,
        }
        true
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Take the content out, resetting the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whitespace-only input counts as empty.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Render as one line. When `active`, the char under the cursor is
    /// drawn inverted; an empty buffer shows `placeholder`.
    pub fn render_line(&self, active: bool, placeholder: &str) -> Line<'static> {
        if self.content.is_empty() && !active {
            return Line::styled(placeholder.to_string(), theme::muted());
        }
        if !active {
            return Line::raw(self.content.clone());
        }

        let before = &self.content[..self.cursor];
        let (cursor_char, after) = match self.content[self.cursor..].chars().next() {
            Some(c) => (
                c.to_string(),
                &self.content[self.cursor + c.len_utf8()..],
            ),
            None => (" ".to_string(), ""),
        };

        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(
                cursor_char,
                Style::default().bg(theme::TEXT).fg(theme::BG_BASE),
            ),
            Span::raw(after.to_string()),
        ])
    }
}
