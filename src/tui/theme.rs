//! Slate & Amber color theme for the PDF Q&A TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Slate blue, assistant messages.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x7C, 0xFA);
/// Light slate for hints and selections.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x91, 0xA7, 0xFF);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber for titles and modal borders.
pub const ACCENT: Color = Color::Rgb(0xFF, 0xB3, 0x47);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Base background, used as foreground on badges.
pub const BG_BASE: Color = Color::Rgb(0x14, 0x17, 0x1F);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE4, 0xE6, 0xEB);
/// Secondary labels, idle borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x8A, 0x8F, 0x9C);
/// Disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x55, 0x5A, 0x66);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Titles and selected items.
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Selected row in a list.
pub fn highlight() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Key hint style (e.g., "o:open").
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Insert mode badge.
pub fn insert_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with idle styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(TEXT_DIM))
}

/// Modal frame in the accent color.
pub fn block_modal(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
}
