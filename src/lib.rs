// src/lib.rs — hotelchat library root

pub mod backend;
pub mod cli;
pub mod infra;
pub mod session;
pub mod tui;
