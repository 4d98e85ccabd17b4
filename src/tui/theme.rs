// src/tui/theme.rs — Color scheme and style definitions for the admin inbox.

use ratatui::style::{Color, Modifier, Style};

use crate::session::inbox::Role;
use crate::session::notify::Level;

pub struct Theme;

impl Theme {
    // ── Palette ──────────────────────────────────────────────────
    pub const NAVY: Color = Color::Rgb(44, 90, 160);
    pub const SAND: Color = Color::Rgb(230, 190, 120);
    pub const WHITE: Color = Color::Rgb(240, 240, 240);
    pub const GREEN: Color = Color::Rgb(80, 200, 120);
    pub const RED: Color = Color::Rgb(230, 80, 80);
    pub const GRAY: Color = Color::Rgb(120, 120, 140);
    pub const DIM: Color = Color::Rgb(80, 80, 100);
    pub const SKY: Color = Color::Rgb(110, 170, 240);

    // ── Semantic styles ──────────────────────────────────────────

    /// Title bar.
    pub fn header() -> Style {
        Style::default().fg(Theme::SAND).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Theme::DIM)
    }

    /// Border of the pane that has keyboard focus.
    pub fn border_focus() -> Style {
        Style::default().fg(Theme::SAND)
    }

    pub fn text() -> Style {
        Style::default().fg(Theme::WHITE)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Theme::GRAY)
    }

    pub fn success() -> Style {
        Style::default().fg(Theme::GREEN)
    }

    pub fn error() -> Style {
        Style::default().fg(Theme::RED)
    }

    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::SAND)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Highlighted thread in the list.
    pub fn table_selected() -> Style {
        Style::default()
            .bg(Color::Rgb(40, 40, 60))
            .fg(Theme::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Theme::SAND)
    }

    pub fn key_desc() -> Style {
        Style::default().fg(Theme::GRAY)
    }

    /// Sender label in the conversation pane.
    pub fn role(role: &Role) -> Style {
        match role {
            Role::User => Style::default().fg(Theme::SKY).add_modifier(Modifier::BOLD),
            Role::Assistant => Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD),
            Role::Other(_) => Style::default().fg(Theme::GRAY).add_modifier(Modifier::BOLD),
        }
    }

    /// Toast line in the footer.
    pub fn toast(level: Level) -> Style {
        match level {
            Level::Info => Theme::success(),
            Level::Error => Theme::error().add_modifier(Modifier::BOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_are_distinguishable() {
        assert_ne!(Theme::role(&Role::User), Theme::role(&Role::Assistant));
        assert_eq!(Theme::role(&Role::User).fg, Some(Theme::SKY));
        assert_eq!(Theme::role(&Role::Other("system".into())).fg, Some(Theme::GRAY));
    }

    #[test]
    fn test_toast_levels() {
        assert_eq!(Theme::toast(Level::Info).fg, Some(Theme::GREEN));
        let err = Theme::toast(Level::Error);
        assert_eq!(err.fg, Some(Theme::RED));
        assert!(err.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_header_style() {
        let s = Theme::header();
        assert_eq!(s.fg, Some(Theme::SAND));
        assert!(s.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_table_header_style() {
        let s = Theme::table_header();
        assert!(s.add_modifier.contains(Modifier::BOLD));
        assert!(s.add_modifier.contains(Modifier::UNDERLINED));
    }
}
