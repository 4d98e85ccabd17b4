// src/session/admin.rs — Admin login, conversation fetch, inbox selection
//
// Independent of the guest `Session`. The token only ever lives in memory.

use std::sync::Arc;

use super::inbox::{Inbox, Thread};
use super::notify::{Notification, UiEvent, UiSink};
use crate::backend::{AdminLoginRequest, Backend};
use crate::infra::errors::ClientError;

pub struct AdminSession {
    backend: Arc<dyn Backend>,
    sink: UiSink,
    chat_limit: u32,
    token: Option<String>,
    dashboard_open: bool,
    inbox: Option<Inbox>,
    selected: Option<String>,
}

impl AdminSession {
    pub fn new(backend: Arc<dyn Backend>, sink: UiSink, chat_limit: u32) -> Self {
        Self {
            backend,
            sink,
            chat_limit,
            token: None,
            dashboard_open: false,
            inbox: None,
            selected: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_dashboard_open(&self) -> bool {
        self.dashboard_open
    }

    pub fn inbox(&self) -> Option<&Inbox> {
        self.inbox.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn notify(&self, notification: Notification) {
        (self.sink)(UiEvent::Notify(notification));
    }

    /// Log in and, on success, open the dashboard and load conversations.
    /// Returns whether the session is now logged in.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.notify(Notification::error("Please enter username and password"));
            return false;
        }

        let request = AdminLoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.backend.admin_login(&request).await {
            Ok(reply) => {
                tracing::info!("admin login succeeded for {}", username);
                self.token = Some(reply.token);
                self.dashboard_open = true;
                self.notify(Notification::info("Logged in as admin"));
                self.load_data().await;
                true
            }
            Err(ClientError::Rejected { status, .. }) => {
                tracing::warn!("admin login rejected (HTTP {})", status);
                self.notify(Notification::error("Invalid credentials"));
                false
            }
            Err(e) => {
                tracing::warn!("admin login failed: {}", e);
                self.notify(Notification::error(format!("Login failed: {}", e.detail())));
                false
            }
        }
    }

    /// Fetch recent conversations and rebuild the inbox. On failure the
    /// previous inbox is kept. Returns whether fresh data was loaded.
    pub async fn load_data(&mut self) -> bool {
        let Some(token) = self.token.clone() else {
            self.notify(Notification::error(ClientError::NotLoggedIn.to_string()));
            return false;
        };

        match self.backend.admin_chats(&token, self.chat_limit).await {
            Ok(page) => {
                let inbox = Inbox::from_records(page.conversations, page.count);
                tracing::debug!(
                    threads = inbox.threads.len(),
                    total = inbox.total_records,
                    "admin inbox loaded"
                );
                if let Some(sel) = self.selected.as_deref() {
                    if inbox.thread(sel).is_none() {
                        self.selected = None;
                    }
                }
                self.inbox = Some(inbox);
                true
            }
            Err(ClientError::Rejected { status, .. }) => {
                tracing::warn!("admin chats rejected (HTTP {})", status);
                self.notify(Notification::error("Failed to load admin data"));
                false
            }
            Err(e) => {
                tracing::warn!("admin chats failed: {}", e);
                self.notify(Notification::error(format!(
                    "Error loading data: {}",
                    e.detail()
                )));
                false
            }
        }
    }

    /// Select a thread and return it; its messages are oldest first.
    pub fn open_chat(&mut self, user_id: &str) -> Option<&Thread> {
        let exists = self
            .inbox
            .as_ref()
            .is_some_and(|inbox| inbox.thread(user_id).is_some());
        if !exists {
            return None;
        }
        self.selected = Some(user_id.to_string());
        self.inbox.as_ref().and_then(|inbox| inbox.thread(user_id))
    }

    /// Log out: token, inbox and selection are all dropped.
    pub fn close_dashboard(&mut self) {
        self.token = None;
        self.dashboard_open = false;
        self.inbox = None;
        self.selected = None;
    }
}
