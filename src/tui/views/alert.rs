//! Blocking alert dialog for errors and warnings that need acknowledgement.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::events::NotificationLevel;
use crate::tui::layout::centered_rect;
use crate::tui::theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Returns false once dismissed (Enter, Esc or Space).
    pub fn handle_input(&self, event: &Event) -> bool {
        !matches!(
            event,
            Event::Key(KeyEvent {
                code: KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '),
                kind: KeyEventKind::Press,
                ..
            })
        )
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 30, area);
        let color = match self.level {
            NotificationLevel::Error => theme::ERROR,
            NotificationLevel::Warning => theme::WARNING,
            NotificationLevel::Info => theme::INFO,
        };

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        let lines = vec![
            Line::raw(""),
            Line::raw(format!(" {}", self.message)),
            Line::raw(""),
            Line::styled(" Press Enter to dismiss", theme::muted()),
        ];

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            modal,
        );
    }
}
