//! Scrollable modal showing the extracted-text debug report.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::document::Document;
use crate::tui::layout::centered_rect;
use crate::tui::theme;

/// Shown when debug is requested before any PDF with pages is loaded.
pub const NO_DOCUMENT_TEXT: &str = "No PDF text loaded!";

pub struct DebugView {
    text: String,
    scroll: u16,
}

impl DebugView {
    pub fn new(document: Option<&Document>) -> Self {
        Self {
            text: document
                .filter(|doc| doc.page_count() > 0)
                .map(Document::debug_report)
                .unwrap_or_else(|| NO_DOCUMENT_TEXT.to_string()),
            scroll: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns false when the modal should close.
    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return true;
        };

        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('d') => return false,
            KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(80, 80, area);
        let block = theme::block_modal("PDF Debug (j/k scroll, Esc close)");

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(self.text.as_str())
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            modal,
        );
    }
}
