//! Chat view: the session transcript and the question input.

use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::core::session_log::{ChatEntry, Sender, SessionLog};
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatInputMode {
    Normal,
    Insert,
}

/// Outcome of feeding a terminal event to the chat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// Not handled; the global keymap gets it.
    Ignored,
    Consumed,
    /// A non-blank question was submitted.
    Submit(String),
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(theme::SUCCESS),
        Sender::Assistant => Style::default().fg(theme::PRIMARY),
        Sender::System => Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::ITALIC),
    }
}

/// Hard-wrap `text` to `width` columns, honoring embedded newlines.
///
/// Wrapping is per char; every char counts as one column.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.split('\n') {
        if raw.is_empty() {
            out.push(String::new());
            continue;
        }
        let chars: Vec<char> = raw.chars().collect();
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    out
}

fn entry_lines(entry: &ChatEntry, width: usize) -> Vec<Line<'static>> {
    let style = sender_style(entry.sender);
    let mut lines: Vec<Line<'static>> = wrap_text(&entry.render(), width)
        .into_iter()
        .map(|l| Line::styled(l, style))
        .collect();
    lines.push(Line::raw(""));
    lines
}

// ============================================================================
// State
// ============================================================================

pub struct ChatView {
    input_mode: ChatInputMode,
    input: InputBuffer,
    scroll_offset: usize,
    auto_scroll: bool,
    /// Bottom-most offset as of the last render; anchors scrolling out of
    /// follow mode.
    max_scroll: Cell<usize>,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            input_mode: ChatInputMode::Normal,
            input: InputBuffer::new(),
            scroll_offset: 0,
            auto_scroll: true,
            max_scroll: Cell::new(0),
        }
    }

    pub fn input_mode(&self) -> ChatInputMode {
        self.input_mode
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    // ── Input handling (two-phase) ───────────────────────────────────

    /// `can_submit` is false while an answer is pending; Enter then keeps
    /// the typed question in place.
    pub fn handle_input(&mut self, event: &Event, can_submit: bool) -> ChatInput {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return ChatInput::Ignored;
        };

        match self.input_mode {
            ChatInputMode::Insert => self.handle_insert_input(*code, *modifiers, can_submit),
            ChatInputMode::Normal => self.handle_normal_input(*code, *modifiers),
        }
    }

    fn handle_insert_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        can_submit: bool,
    ) -> ChatInput {
        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => ChatInput::Ignored,
            (_, KeyCode::Esc) => {
                self.input_mode = ChatInputMode::Normal;
                ChatInput::Consumed
            }
            (_, KeyCode::Enter) => {
                if self.input.is_blank() || !can_submit {
                    return ChatInput::Consumed;
                }
                let question = self.input.take().trim().to_string();
                self.scroll_to_bottom();
                ChatInput::Submit(question)
            }
            _ => {
                self.input.apply_key(code, modifiers);
                ChatInput::Consumed
            }
        }
    }

    fn handle_normal_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> ChatInput {
        if modifiers != KeyModifiers::NONE && modifiers != KeyModifiers::SHIFT {
            return ChatInput::Ignored;
        }

        match code {
            KeyCode::Char('i') | KeyCode::Enter => {
                self.input_mode = ChatInputMode::Insert;
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(1),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::Char('G') | KeyCode::End => self.scroll_to_bottom(),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to_top(),
            _ => return ChatInput::Ignored,
        }
        ChatInput::Consumed
    }

    // ── Scrolling ────────────────────────────────────────────────────

    /// Leaving follow mode starts from the bottom, not the stale offset.
    fn anchor_offset(&mut self) {
        let max = self.max_scroll.get();
        self.scroll_offset = if self.auto_scroll {
            max
        } else {
            self.scroll_offset.min(max)
        };
    }

    fn scroll_down(&mut self, n: usize) {
        self.anchor_offset();
        let max = self.max_scroll.get();
        self.scroll_offset = self.scroll_offset.saturating_add(n).min(max);
        // Reaching the bottom resumes following
        self.auto_scroll = self.scroll_offset >= max;
    }

    fn scroll_up(&mut self, n: usize) {
        self.anchor_offset();
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
        self.auto_scroll = false;
    }

    /// Follow new entries again.
    pub fn scroll_to_bottom(&mut self) {
        self.auto_scroll = true;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
        self.auto_scroll = false;
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render_transcript(&self, frame: &mut Frame, area: Rect, log: &SessionLog) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::TEXT_MUTED))
            .title(" Chat ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if log.is_empty() {
            self.max_scroll.set(0);
            let welcome = Paragraph::new(vec![
                Line::raw(""),
                Line::styled("  PDF Q&A Assistant", theme::title()),
                Line::raw(""),
                Line::styled("  Press o to open a PDF, then i to ask a question.", theme::muted()),
                Line::styled("  Press ? for all keybindings.", theme::muted()),
            ]);
            frame.render_widget(welcome, inner);
            return;
        }

        // Leave a column for the scrollbar
        let width = inner.width.saturating_sub(1) as usize;
        let all_lines: Vec<Line> = log
            .entries()
            .iter()
            .flat_map(|e| entry_lines(e, width))
            .collect();

        let visible_height = inner.height as usize;
        let total = all_lines.len();
        let max_scroll = total.saturating_sub(visible_height);
        self.max_scroll.set(max_scroll);
        let effective_scroll = if self.auto_scroll {
            max_scroll
        } else {
            self.scroll_offset.min(max_scroll)
        };

        let visible: Vec<Line> = all_lines
            .into_iter()
            .skip(effective_scroll)
            .take(visible_height)
            .collect();
        frame.render_widget(Paragraph::new(visible), inner);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(total)
                .position(effective_scroll)
                .viewport_content_length(visible_height);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut scrollbar_state,
            );
        }

        if !self.auto_scroll && effective_scroll < max_scroll {
            let indicator = Line::styled(
                " ↓ more below (G) ",
                Style::default()
                    .fg(theme::BG_BASE)
                    .bg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
            let indicator_area = Rect::new(
                inner.x + inner.width.saturating_sub(19),
                inner.y + inner.height.saturating_sub(1),
                19.min(inner.width),
                1,
            );
            frame.render_widget(Paragraph::new(indicator), indicator_area);
        }
    }

    /// `enabled` is false while an answer is pending.
    pub fn render_input(&self, frame: &mut Frame, area: Rect, enabled: bool) {
        let active = self.input_mode == ChatInputMode::Insert;
        let (border_color, title) = match (active, enabled) {
            (true, true) => (theme::ACCENT, " Question (Enter to ask, Esc to leave) "),
            (true, false) => (theme::TEXT_DIM, " Question (waiting for answer...) "),
            (false, _) => (theme::TEXT_MUTED, " Question "),
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title);
        if active {
            block = block.title(
                Line::from(Span::styled(" INSERT ", theme::insert_badge()))
                    .alignment(ratatui::layout::Alignment::Right),
            );
        }

        let line = self
            .input
            .render_line(active, "Press i to type a question about the PDF...");
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
