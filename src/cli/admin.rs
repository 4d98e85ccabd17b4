// src/cli/admin.rs — Admin login, then the inbox TUI

use std::sync::Arc;

use anyhow::anyhow;

use crate::backend::Backend;
use crate::infra::config::Config;
use crate::session::admin::AdminSession;
use crate::session::notify::{EventLog, Level};

const MAX_ATTEMPTS: usize = 3;

/// Prompt for credentials, log in, and hand over to the inbox.
pub async fn run_admin(
    backend: Arc<dyn Backend>,
    config: &Config,
    username: Option<&str>,
) -> anyhow::Result<()> {
    let notices = EventLog::new();
    let mut admin = AdminSession::new(backend, notices.sink(), config.admin.chat_limit);

    for attempt in 1..=MAX_ATTEMPTS {
        let user = match username {
            Some(u) if attempt == 1 => u.to_string(),
            _ => inquire::Text::new("Admin username:")
                .with_initial_value(username.unwrap_or(""))
                .prompt()
                .map_err(|e| anyhow!("Input cancelled: {e}"))?,
        };
        let password = inquire::Password::new("Password:")
            .without_confirmation()
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .prompt()
            .map_err(|e| anyhow!("Input cancelled: {e}"))?;

        if admin.login(&user, &password).await {
            tracing::info!(user = %user, "admin logged in");
            return crate::tui::run_inbox(&mut admin, notices, config.ui.notification_ttl())
                .await;
        }

        // Login failures only reach the event log; show them here.
        for n in notices.notifications() {
            match n.level {
                Level::Error => eprintln!("  [error] {}", n.message),
                Level::Info => eprintln!("  {}", n.message),
            }
        }
        notices.take();
    }

    Err(anyhow!("Login failed after {} attempts", MAX_ATTEMPTS))
}
