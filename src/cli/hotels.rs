// src/cli/hotels.rs — Catalogue listing and the guest's own chat history

use std::sync::Arc;

use crate::backend::{Backend, HotelSuggestion};
use crate::session::inbox::{group_conversations, Thread};

/// `hotelchat hotels [--max-price N]`
pub async fn run_hotels(backend: Arc<dyn Backend>, max_price: Option<u32>) -> anyhow::Result<()> {
    let catalogue = backend.hotels(max_price).await?;
    if catalogue.hotels.is_empty() {
        eprintln!("No hotels found.");
        return Ok(());
    }
    println!("{}", format_catalogue(&catalogue.hotels));
    let count = catalogue.count.unwrap_or(catalogue.hotels.len() as u64);
    eprintln!("\n{} hotel(s)", count);
    Ok(())
}

/// `hotelchat history`
pub async fn run_history(backend: Arc<dyn Backend>, user_id: &str) -> anyhow::Result<()> {
    let page = backend.conversations(user_id).await?;
    let threads = group_conversations(page.conversations);
    match threads.iter().find(|t| t.user_id == user_id) {
        Some(thread) => println!("{}", format_history(thread)),
        None => eprintln!("No conversation history for {}.", user_id),
    }
    Ok(())
}

fn format_catalogue(hotels: &[HotelSuggestion]) -> String {
    let mut out = format!(
        "{:<6} {:<30} {:>10} {:>6}  {}",
        "ID", "NAME", "PRICE", "RATING", "AREA"
    );
    for h in hotels {
        out.push('\n');
        out.push_str(&format!(
            "{:<6} {:<30} {:>10} {:>6}  {}",
            h.id,
            truncate(&h.name, 30),
            format!("₹{:.0}", h.price_per_night),
            h.rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".into()),
            h.area.as_deref().unwrap_or("-"),
        ));
    }
    out
}

fn format_history(thread: &Thread) -> String {
    thread
        .messages
        .iter()
        .map(|m| {
            let when = m
                .at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "N/A".into());
            format!("[{}] {}: {}", when, m.role.label(), m.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    }
}
