// src/cli/mod.rs — CLI definition (clap derive)

pub mod admin;
pub mod chat;
pub mod hotels;
pub mod render;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hotelchat", about = "Chat with the hotel booking assistant", version)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    /// Booking server base URL (overrides config)
    #[arg(long, env = "HOTELCHAT_SERVER")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive booking chat (default)
    Chat,
    /// Log in as admin and browse guest conversations
    Admin {
        /// Pre-fill the username prompt
        #[arg(short, long)]
        username: Option<String>,
    },
    /// List hotels from the catalogue
    Hotels {
        /// Only hotels at or below this nightly price
        #[arg(long)]
        max_price: Option<u32>,
    },
    /// Show your past conversation with the assistant
    History,
    /// Print your guest id
    Whoami,
}
