//! "Open PDF" modal: a single path input.

use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::tui::layout::centered_rect;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    Consumed,
    Submit(PathBuf),
    Cancel,
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}

pub struct PathPrompt {
    input: InputBuffer,
}

impl PathPrompt {
    /// Start with `initial` (usually the last opened path) pre-filled.
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            input: initial.map(InputBuffer::with_text).unwrap_or_default(),
        }
    }

    pub fn handle_input(&mut self, event: &Event) -> PromptResult {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return PromptResult::Consumed;
        };

        match code {
            KeyCode::Esc => PromptResult::Cancel,
            KeyCode::Enter if !self.input.is_blank() => {
                PromptResult::Submit(expand_home(self.input.text()))
            }
            _ => {
                self.input.apply_key(*code, *modifiers);
                PromptResult::Consumed
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(70, 30, area);
        let block = theme::block_modal("Open PDF");
        let inner = block.inner(modal);

        frame.render_widget(Clear, modal);
        frame.render_widget(block, modal);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Line::styled(" Path to a PDF file:", theme::muted())),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(self.input.render_line(true, "")),
            rows[2],
        );
        frame.render_widget(
            Paragraph::new(Line::styled(" Enter: load   Esc: cancel", theme::muted())),
            rows[4],
        );
    }
}
