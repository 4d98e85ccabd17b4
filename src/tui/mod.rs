// src/tui/mod.rs — Admin inbox TUI.
//
// Two panes built with ratatui: the thread list on the left, the open
// conversation on the right. Launch via `hotelchat admin`.

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::run_inbox;
