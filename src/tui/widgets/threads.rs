// src/tui/widgets/threads.rs — Left pane: one row per user, newest first.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::session::inbox::Inbox;
use crate::tui::theme::Theme;

const PREVIEW_CHARS: usize = 40;

pub fn render(f: &mut Frame, area: Rect, inbox: &Inbox, state: &mut TableState, focused: bool) {
    let header = Row::new(vec![
        Cell::from("User").style(Theme::table_header()),
        Cell::from("Last").style(Theme::table_header()),
        Cell::from("Msgs").style(Theme::table_header()),
        Cell::from("Preview").style(Theme::table_header()),
    ]);

    let rows: Vec<Row> = inbox
        .threads
        .iter()
        .map(|t| {
            let last = t
                .last_at()
                .map(|at| at.format("%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "N/A".into());
            Row::new(vec![
                Cell::from(short_id(&t.user_id)).style(Theme::text()),
                Cell::from(last).style(Theme::text_dim()),
                Cell::from(t.messages.len().to_string()).style(Theme::text_dim()),
                Cell::from(t.preview(PREVIEW_CHARS)).style(Theme::text()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(5),
        Constraint::Min(10),
    ];

    let border = if focused {
        Theme::border_focus()
    } else {
        Theme::border()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Conversations ({}) ", inbox.threads.len()))
                .borders(Borders::ALL)
                .border_style(border),
        )
        .row_highlight_style(Theme::table_selected())
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, state);
}

/// User ids are UUIDs; the first block is enough to tell them apart on screen.
fn short_id(id: &str) -> String {
    match id.split_once('-') {
        Some((head, _)) if head.len() >= 6 => head.to_string(),
        _ => id.chars().take(10).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3f2a9c1e-1111-4222-8333-444455556666"), "3f2a9c1e");
        assert_eq!(short_id("u1a2b3c4d5e6"), "u1a2b3c4d5");
        assert_eq!(short_id("a-b"), "a-b");
    }
}
