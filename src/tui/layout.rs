//! Root layout computation: header, transcript, question input, status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the header (bordered, one line of content).
pub const HEADER_HEIGHT: u16 = 3;
/// Height of the question input box.
pub const INPUT_HEIGHT: u16 = 3;
/// Below this terminal height the header is dropped.
pub const HIDE_HEADER_THRESHOLD: u16 = 12;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Connection, model and document summary (None if too short).
    pub header: Option<Rect>,
    /// Chat transcript.
    pub chat: Rect,
    /// Question input.
    pub input: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        if area.height < HIDE_HEADER_THRESHOLD {
            let rows = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);
            return AppLayout {
                header: None,
                chat: rows[0],
                input: rows[1],
                status: rows[2],
            };
        }

        let rows = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

        AppLayout {
            header: Some(rows[0]),
            chat: rows[1],
            input: rows[2],
            status: rows[3],
        }
    }
}

/// Calculate a centered rect using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
