// src/cli/render.rs — Terminal renderer for session events

use std::sync::Arc;

use crate::backend::HotelSuggestion;
use crate::session::notify::{Author, Level, UiEvent, UiSink};
use crate::session::PaymentSummary;

/// Where a formatted event should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Conversation content: stdout.
    Out(String),
    /// Status chatter (typing, toasts): stderr.
    Err(String),
}

/// Format one event for the terminal. `None` for events with no visible effect.
pub fn format_event(event: &UiEvent) -> Option<Line> {
    match event {
        UiEvent::Message {
            author: Author::User,
            text,
        } => Some(Line::Out(format!("you: {}", text))),
        UiEvent::Message {
            author: Author::Bot,
            text,
        } => Some(Line::Out(format!("bot: {}", text))),
        UiEvent::Suggestions(hotels) => Some(Line::Out(format_suggestions(hotels))),
        UiEvent::TypingStarted => Some(Line::Err("  ...".into())),
        UiEvent::TypingStopped | UiEvent::InputCleared => None,
        UiEvent::Notify(n) => {
            let tag = match n.level {
                Level::Info => "[info]",
                Level::Error => "[error]",
            };
            Some(Line::Err(format!("{} {}", tag, n.message)))
        }
        UiEvent::PaymentModalOpened(summary) => Some(Line::Out(format_payment(summary))),
        UiEvent::PaymentLink(url) => Some(Line::Out(format!("  pay: {}", url))),
    }
}

fn format_suggestions(hotels: &[HotelSuggestion]) -> String {
    let mut out = String::new();
    for h in hotels {
        out.push_str(&format!(
            "  [{}] {}  ₹{:.0}/night",
            h.id, h.name, h.price_per_night
        ));
        if let Some(rating) = h.rating {
            out.push_str(&format!("  ★{:.1}", rating));
        }
        if let Some(area) = &h.area {
            out.push_str(&format!("  {}", area));
        }
        out.push('\n');
    }
    out.push_str("  /book <id> to reserve, /details <id> for more");
    out
}

fn format_payment(summary: &PaymentSummary) -> String {
    format!(
        "  ── Payment ──\n  Hotel:     {}\n  Booking:   {}\n  Subtotal:  ₹{}\n  GST:       ₹{}\n  Total:     ₹{}",
        summary.hotel_name,
        summary.booking_id,
        summary.subtotal_display(),
        summary.gst_display(),
        summary.total_display(),
    )
}

/// Build a sink that writes formatted events to the terminal.
///
/// Conversation goes to stdout; typing and notifications go to stderr.
pub fn terminal_sink() -> UiSink {
    Arc::new(|event| match format_event(&event) {
        Some(Line::Out(s)) => println!("{}", s),
        Some(Line::Err(s)) => eprintln!("{}", s),
        None => {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::notify::Notification;

    fn hotel(id: &str, name: &str, price: f64) -> HotelSuggestion {
        HotelSuggestion {
            id: id.into(),
            name: name.into(),
            price_per_night: price,
            rating: None,
            area: None,
        }
    }

    #[test]
    fn test_message_format() {
        assert_eq!(
            format_event(&UiEvent::user("hello")),
            Some(Line::Out("you: hello".into()))
        );
        assert_eq!(
            format_event(&UiEvent::bot("hi there")),
            Some(Line::Out("bot: hi there".into()))
        );
    }

    #[test]
    fn test_silent_events() {
        assert_eq!(format_event(&UiEvent::TypingStopped), None);
        assert_eq!(format_event(&UiEvent::InputCleared), None);
    }

    #[test]
    fn test_notifications_go_to_stderr() {
        let line = format_event(&UiEvent::Notify(Notification::error("Booking failed!")));
        assert_eq!(line, Some(Line::Err("[error] Booking failed!".into())));
        let line = format_event(&UiEvent::Notify(Notification::info("ok")));
        assert_eq!(line, Some(Line::Err("[info] ok".into())));
    }

    #[test]
    fn test_suggestion_cards() {
        let mut h = hotel("7", "Sea View", 2500.0);
        h.rating = Some(4.3);
        h.area = Some("Baga".into());
        let Some(Line::Out(text)) = format_event(&UiEvent::Suggestions(vec![
            h,
            hotel("9", "Budget Inn", 900.0),
        ])) else {
            panic!("suggestions should render to stdout");
        };
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  [7] Sea View  ₹2500/night  ★4.3  Baga");
        assert_eq!(lines[1], "  [9] Budget Inn  ₹900/night");
    }

    #[test]
    fn test_payment_summary_block() {
        let summary = PaymentSummary {
            hotel_name: "Sea View".into(),
            booking_id: "B1".into(),
            subtotal: 1000.0,
            gst: 180.0,
            total: 1180.0,
        };
        let Some(Line::Out(text)) = format_event(&UiEvent::PaymentModalOpened(summary)) else {
            panic!("payment summary should render to stdout");
        };
        assert!(text.contains("Subtotal:  ₹1000.00"));
        assert!(text.contains("GST:       ₹180.00"));
        assert!(text.contains("Total:     ₹1180.00"));
    }
}
