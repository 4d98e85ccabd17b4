// src/main.rs — hotelchat entry point

use std::sync::Arc;

use clap::Parser;

use hotelchat::backend::{Backend, HttpBackend};
use hotelchat::cli::{Cli, Commands};
use hotelchat::infra::config::Config;
use hotelchat::infra::identity::IdentityStore;
use hotelchat::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    let config = config.with_base_url(cli.server.clone())?;

    let identity = IdentityStore::default_location();

    // Commands that never reach the server
    if let Some(Commands::Whoami) = cli.command {
        println!("{}", identity.get_user_id());
        tracing::debug!("identity file: {}", identity.path().display());
        return Ok(());
    }

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.server)?);
    tracing::debug!("server: {}", config.server.base_url);

    match cli.command {
        Some(Commands::Admin { username }) => {
            hotelchat::cli::admin::run_admin(backend, &config, username.as_deref()).await
        }
        Some(Commands::Hotels { max_price }) => {
            hotelchat::cli::hotels::run_hotels(backend, max_price).await
        }
        Some(Commands::History) => {
            hotelchat::cli::hotels::run_history(backend, &identity.get_user_id()).await
        }
        Some(Commands::Chat) | Some(Commands::Whoami) | None => {
            hotelchat::cli::chat::run_chat(
                backend,
                identity.get_user_id(),
                &config,
                &config.server.base_url,
            )
            .await
        }
    }
}
