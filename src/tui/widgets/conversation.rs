// src/tui/widgets/conversation.rs — Right pane: the open thread, oldest at top.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::session::inbox::Thread;
use crate::tui::theme::Theme;

/// Render `thread`. `scroll_back` counts lines up from the latest message;
/// zero keeps the newest message in view.
pub fn render(f: &mut Frame, area: Rect, thread: Option<&Thread>, scroll_back: u16) {
    let title = match thread {
        Some(t) => format!(" {} ", t.user_id),
        None => " Conversation ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let Some(thread) = thread else {
        let p = Paragraph::new(Line::from(Span::styled(
            "  Select a conversation and press Enter.",
            Theme::text_dim(),
        )))
        .block(block);
        f.render_widget(p, area);
        return;
    };

    let lines = thread_lines(thread);
    let inner_height = area.height.saturating_sub(2);
    let offset = bottom_offset(lines.len(), inner_height, scroll_back);

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(p, area);
}

fn thread_lines(thread: &Thread) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for m in &thread.messages {
        let when = m
            .at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "N/A".into());
        lines.push(Line::from(vec![
            Span::styled(format!("{:<9}", m.role.label()), Theme::role(&m.role)),
            Span::styled(when, Theme::text_dim()),
        ]));
        for text_line in m.text.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {}", text_line),
                Theme::text(),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Scroll offset that shows the last `height` lines, moved up by `scroll_back`.
/// Wrapped lines may push the very end slightly below the fold.
fn bottom_offset(total_lines: usize, height: u16, scroll_back: u16) -> u16 {
    let max = total_lines.saturating_sub(height as usize);
    let max = u16::try_from(max).unwrap_or(u16::MAX);
    max.saturating_sub(scroll_back)
}
