// src/tui/widgets/mod.rs — Panes of the admin inbox.

pub mod conversation;
pub mod threads;
