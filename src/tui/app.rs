// src/tui/app.rs — Admin inbox: state, event loop, and rendering.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, TableState},
    Frame, Terminal,
};

use crate::session::admin::AdminSession;
use crate::session::notify::{EventLog, Notification, UiEvent};

use super::theme::Theme;
use super::widgets;

// ── App state ────────────────────────────────────────────────────

struct InboxApp {
    table_state: TableState,
    /// Lines scrolled up from the newest message in the open thread.
    scroll_back: u16,
    toast: Option<Notification>,
    toast_ttl: Duration,
    notices: EventLog,
}

impl InboxApp {
    fn new(notices: EventLog, toast_ttl: Duration) -> Self {
        Self {
            table_state: TableState::default(),
            scroll_back: 0,
            toast: None,
            toast_ttl,
            notices,
        }
    }

    /// Pick up the newest notification raised by the admin session.
    fn pull_notices(&mut self) {
        if let Some(latest) = self.notices.take().into_iter().rev().find_map(|e| match e {
            UiEvent::Notify(n) => Some(n),
            _ => None,
        }) {
            self.toast = Some(latest);
        }
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.is_expired(self.toast_ttl))
        {
            self.toast = None;
        }
    }

    fn thread_count(admin: &AdminSession) -> usize {
        admin.inbox().map(|i| i.threads.len()).unwrap_or(0)
    }

    fn select_down(&mut self, admin: &AdminSession) {
        let max = Self::thread_count(admin).saturating_sub(1);
        let i = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some((i + 1).min(max)));
    }

    fn select_up(&mut self) {
        let i = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(i.saturating_sub(1)));
    }

    /// Open the highlighted thread, scrolled to its latest message.
    fn open_highlighted(&mut self, admin: &mut AdminSession) {
        let user_id = self.table_state.selected().and_then(|i| {
            admin
                .inbox()
                .and_then(|inbox| inbox.threads.get(i))
                .map(|t| t.user_id.clone())
        });
        if let Some(user_id) = user_id {
            admin.open_chat(&user_id);
            self.scroll_back = 0;
        }
    }

    /// Keep the highlight on the open thread after a reload.
    fn resync(&mut self, admin: &AdminSession) {
        let pos = admin
            .selected()
            .and_then(|id| admin.inbox().and_then(|inbox| inbox.position(id)));
        match pos {
            Some(p) => self.table_state.select(Some(p)),
            None if Self::thread_count(admin) > 0 => self.table_state.select(Some(0)),
            None => self.table_state.select(None),
        }
    }
}

// ── Public entry point ───────────────────────────────────────────

/// Run the two-pane inbox until the admin logs out (q / Esc / Ctrl-C).
/// Leaving always closes the dashboard and drops the token.
pub async fn run_inbox(
    admin: &mut AdminSession,
    notices: EventLog,
    toast_ttl: Duration,
) -> anyhow::Result<()> {
    let mut app = InboxApp::new(notices, toast_ttl);
    app.resync(admin);
    app.open_highlighted(admin);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, admin).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    admin.close_dashboard();
    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut InboxApp,
    admin: &mut AdminSession,
) -> anyhow::Result<()> {
    loop {
        app.pull_notices();
        terminal.draw(|f| render(f, app, admin))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.code == KeyCode::Char('q')
            || key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return Ok(());
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.select_down(admin),
            KeyCode::Up | KeyCode::Char('k') => app.select_up(),
            KeyCode::Enter => app.open_highlighted(admin),
            KeyCode::PageUp => app.scroll_back = app.scroll_back.saturating_add(5),
            KeyCode::PageDown => app.scroll_back = app.scroll_back.saturating_sub(5),
            KeyCode::Char('r') => {
                admin.load_data().await;
                app.resync(admin);
            }
            _ => {}
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────

fn render(f: &mut Frame, app: &mut InboxApp, admin: &AdminSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + stats
            Constraint::Min(8),    // Panes
            Constraint::Length(1), // Toast / key hints
        ])
        .split(f.area());

    render_header(f, chunks[0], admin);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    match admin.inbox() {
        Some(inbox) if !inbox.threads.is_empty() => {
            widgets::threads::render(f, panes[0], inbox, &mut app.table_state, true);
            let open = admin.selected().and_then(|id| inbox.thread(id));
            widgets::conversation::render(f, panes[1], open, app.scroll_back);
        }
        _ => {
            let p = Paragraph::new(Line::from(Span::styled(
                "  No conversations found",
                Theme::text_dim(),
            )));
            f.render_widget(p, chunks[1]);
        }
    }

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, admin: &AdminSession) {
    let (total, users) = admin
        .inbox()
        .map(|i| (i.total_records, i.active_users()))
        .unwrap_or((0, 0));
    let line = Line::from(vec![
        Span::styled(" Admin Inbox ", Theme::header()),
        Span::styled(" total chats: ", Theme::text_dim()),
        Span::styled(total.to_string(), Theme::text()),
        Span::styled("  active users: ", Theme::text_dim()),
        Span::styled(users.to_string(), Theme::text()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &InboxApp) {
    let line = match &app.toast {
        Some(toast) => Line::from(Span::styled(
            format!(" {}", toast.message),
            Theme::toast(toast.level),
        )),
        None => Line::from(vec![
            Span::styled(" q", Theme::key_hint()),
            Span::styled(" logout  ", Theme::key_desc()),
            Span::styled("j/k/\u{2191}\u{2193}", Theme::key_hint()),
            Span::styled(" select  ", Theme::key_desc()),
            Span::styled("Enter", Theme::key_hint()),
            Span::styled(" open  ", Theme::key_desc()),
            Span::styled("PgUp/PgDn", Theme::key_hint()),
            Span::styled(" scroll  ", Theme::key_desc()),
            Span::styled("r", Theme::key_hint()),
            Span::styled(" refresh", Theme::key_desc()),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}
