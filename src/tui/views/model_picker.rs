//! Model selection modal over the last registry listing.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::layout::centered_rect;
use crate::tui::theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResult {
    Consumed,
    Select(String),
    /// Close and re-run the registry probe.
    Refresh,
    Close,
}

pub struct ModelPicker {
    models: Vec<String>,
    selected: usize,
    current: Option<String>,
}

impl ModelPicker {
    /// Opens with the cursor on `current` when it is listed.
    pub fn new(models: Vec<String>, current: Option<&str>) -> Self {
        let selected = current
            .and_then(|c| models.iter().position(|m| m == c))
            .unwrap_or(0);
        Self {
            models,
            selected,
            current: current.map(str::to_string),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.models.get(self.selected).map(String::as_str)
    }

    pub fn handle_input(&mut self, event: &Event) -> PickerResult {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return PickerResult::Consumed;
        };

        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => PickerResult::Close,
            KeyCode::Char('r') => PickerResult::Refresh,
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.models.is_empty() {
                    self.selected = (self.selected + 1) % self.models.len();
                }
                PickerResult::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.models.is_empty() {
                    self.selected = (self.selected + self.models.len() - 1) % self.models.len();
                }
                PickerResult::Consumed
            }
            KeyCode::Enter => match self.selected() {
                Some(name) => PickerResult::Select(name.to_string()),
                None => PickerResult::Close,
            },
            _ => PickerResult::Consumed,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(50, 60, area);
        let block = theme::block_modal("Select Model");
        frame.render_widget(Clear, modal);

        if self.models.is_empty() {
            let body = Paragraph::new(vec![
                Line::raw(""),
                Line::styled(" No models available.", theme::muted()),
                Line::styled(" Press r to refresh, Esc to close.", theme::muted()),
            ])
            .block(block);
            frame.render_widget(body, modal);
            return;
        }

        let items: Vec<ListItem> = self
            .models
            .iter()
            .map(|m| {
                let marker = if self.current.as_deref() == Some(m.as_str()) {
                    "● "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, theme::title()),
                    Span::raw(m.clone()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::highlight());
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, modal, &mut state);
    }
}
