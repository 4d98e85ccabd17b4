// src/session/notify.rs — UI events emitted by the session flows
//
// Flows never touch a terminal. They push `UiEvent`s into a sink and the
// active surface (REPL, TUI, test recorder) decides how to show them.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::backend::HotelSuggestion;
use crate::session::payment::PaymentSummary;

/// Callback that receives every UI event. Shared with background tasks,
/// so it must be cheap to clone and safe to call after the surface is gone.
pub type UiSink = Arc<dyn Fn(UiEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A line in the conversation.
    Message { author: Author, text: String },
    /// Hotel cards attached to the preceding bot message.
    Suggestions(Vec<HotelSuggestion>),
    TypingStarted,
    TypingStopped,
    InputCleared,
    Notify(Notification),
    PaymentModalOpened(PaymentSummary),
    PaymentLink(String),
}

impl UiEvent {
    pub fn user(text: impl Into<String>) -> Self {
        UiEvent::Message {
            author: Author::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        UiEvent::Message {
            author: Author::Bot,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Transient toast. Surfaces hide it once `ttl` has elapsed.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: Level,
    pub raised_at: Instant,
}

impl PartialEq for Notification {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.level == other.level
    }
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: Level::Info,
            raised_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: Level::Error,
            raised_at: Instant::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.raised_at.elapsed() >= ttl
    }
}

/// Sink that drops everything.
pub fn discard() -> UiSink {
    Arc::new(|_| {})
}

/// In-memory recorder, used by headless callers and tests.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> UiSink {
        let events = self.events.clone();
        Arc::new(move |event| {
            if let Ok(mut guard) = events.lock() {
                guard.push(event);
            }
        })
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<UiEvent> {
        self.events
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<(Author, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Message { author, text } => Some((author, text)),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}
