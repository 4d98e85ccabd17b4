// src/session/inbox.rs — Group conversation records into per-user threads

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::backend::ConversationRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Role::User,
            "assistant" | "bot" => Role::Assistant,
            _ => Role::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadMessage {
    pub role: Role,
    pub text: String,
    pub at: Option<DateTime<Utc>>,
}

/// All messages from one user, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub user_id: String,
    pub messages: Vec<ThreadMessage>,
}

impl Thread {
    pub fn last(&self) -> Option<&ThreadMessage> {
        self.messages.last()
    }

    pub fn last_at(&self) -> Option<DateTime<Utc>> {
        self.last().and_then(|m| m.at)
    }

    /// Short preview of the latest message for the thread list.
    pub fn preview(&self, max_chars: usize) -> String {
        let text = self.last().map(|m| m.text.as_str()).unwrap_or("");
        let mut out: String = text.chars().take(max_chars).collect();
        if text.chars().count() > max_chars {
            out.push_str("...");
        }
        out.replace('\n', " ")
    }
}

/// Grouped view of one admin fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inbox {
    /// Most recently active user first.
    pub threads: Vec<Thread>,
    /// Total reported by the server, or the number of records fetched.
    pub total_records: u64,
}

impl Inbox {
    pub fn from_records(records: Vec<ConversationRecord>, reported_count: Option<u64>) -> Self {
        let total_records = reported_count.unwrap_or(records.len() as u64);
        Self {
            threads: group_conversations(records),
            total_records,
        }
    }

    pub fn active_users(&self) -> usize {
        self.threads
            .iter()
            .map(|t| t.user_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn thread(&self, user_id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.user_id == user_id)
    }

    pub fn position(&self, user_id: &str) -> Option<usize> {
        self.threads.iter().position(|t| t.user_id == user_id)
    }
}

/// Sort records by time, fold them into per-user threads, then order the
/// threads by their latest message, newest first.
///
/// Records without a readable timestamp sort before everything else, so they
/// never count as a thread's latest message when a dated one exists.
pub fn group_conversations(records: Vec<ConversationRecord>) -> Vec<Thread> {
    let mut dated: Vec<(Option<DateTime<Utc>>, ConversationRecord)> = records
        .into_iter()
        .map(|r| (r.created_at.as_deref().and_then(parse_timestamp), r))
        .collect();
    // Stable: equal timestamps keep server order.
    dated.sort_by(|a, b| a.0.cmp(&b.0));

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut threads: Vec<Thread> = Vec::new();
    for (at, record) in dated {
        let slot = *index.entry(record.user_id.clone()).or_insert_with(|| {
            threads.push(Thread {
                user_id: record.user_id.clone(),
                messages: Vec::new(),
            });
            threads.len() - 1
        });
        threads[slot].messages.push(ThreadMessage {
            role: Role::parse(&record.role),
            text: record.message,
            at,
        });
    }

    threads.sort_by(|a, b| b.last_at().cmp(&a.last_at()));
    threads
}

/// Accepts RFC 3339 and the naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` forms the
/// database emits; naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
