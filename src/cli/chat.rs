// src/cli/chat.rs — Interactive booking REPL

use std::sync::Arc;

use chrono::NaiveDate;
use inquire::validator::Validation;
use inquire::{CustomUserError, InquireError};

use crate::backend::{Backend, HotelSuggestion};
use crate::infra::config::Config;
use crate::session::{BookingForm, BookingOutcome, PaymentHandle, Session};

use super::render;

/// REPL state that outlives a single turn.
struct ChatState {
    /// Latest payment link still waiting on its invoice.
    payment: Option<PaymentHandle>,
}

/// Run the interactive chat REPL against `backend` as guest `user_id`.
pub async fn run_chat(
    backend: Arc<dyn Backend>,
    user_id: String,
    config: &Config,
    server: &str,
) -> anyhow::Result<()> {
    eprintln!(
        "hotelchat v{} | {} | guest {}",
        env!("CARGO_PKG_VERSION"),
        server,
        user_id,
    );
    eprintln!("Type a message, /help for commands, /quit to leave.\n");

    let mut session = Session::new(backend, user_id, render::terminal_sink())
        .with_payment_config(config.payment.clone());
    let mut state = ChatState { payment: None };

    if config.chat.send_greeting {
        session.send_chat(&config.chat.greeting).await;
    }

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        if trimmed.starts_with('/') {
            handle_slash_command(trimmed, &mut session, &mut state).await;
            continue;
        }

        // Blank lines are skipped by the session itself.
        session.send_chat(trimmed).await;
    }

    if let Some(handle) = state.payment.take() {
        eprintln!("  Waiting for invoice...");
        handle.finished().await;
    }
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

async fn handle_slash_command(input: &str, session: &mut Session, state: &mut ChatState) {
    let (cmd, arg) = match input.split_once(' ') {
        Some((c, a)) => (c, a.trim()),
        None => (input, ""),
    };

    match cmd {
        "/book" => {
            if arg.is_empty() {
                eprintln!("  Usage: /book <hotel id>");
                return;
            }
            book_flow(arg, session, state).await;
        }

        "/select" => {
            if arg.is_empty() {
                eprintln!("  Usage: /select <hotel id>");
                return;
            }
            session.select_hotel(arg).await;
        }

        "/details" => match session.hotel_details(arg) {
            Some(h) => print_details(h),
            None => eprintln!("  No suggested hotel with id '{}'", arg),
        },

        "/hotels" => {
            let known = session.context().suggestions.all();
            if known.is_empty() {
                eprintln!("  No hotels suggested yet.");
            } else {
                for h in known {
                    eprintln!("  [{}] {}  ₹{:.0}/night", h.id, h.name, h.price_per_night);
                }
            }
        }

        "/prefs" => {
            let prefs = session.preferences();
            eprintln!("  Nights:   {}", opt(prefs.nights));
            eprintln!("  Visitors: {}", opt(prefs.visitors));
            eprintln!(
                "  Budget:   {}",
                prefs
                    .budget
                    .map(|b| format!("₹{:.0}", b))
                    .unwrap_or_else(|| "-".into())
            );
        }

        "/paid" => match state.payment.as_mut() {
            Some(handle) => {
                handle.confirm_paid();
                eprintln!("  Payment confirmed, requesting invoice...");
            }
            None => eprintln!("  No payment in progress."),
        },

        "/help" => {
            eprintln!("  /book <id>      Book a suggested hotel");
            eprintln!("  /select <id>    Ask the assistant about a hotel");
            eprintln!("  /details <id>   Show a suggested hotel");
            eprintln!("  /hotels         List hotels suggested so far");
            eprintln!("  /prefs          Show remembered trip details");
            eprintln!("  /paid           Confirm you completed payment");
            eprintln!("  /quit           Leave");
        }

        _ => {
            eprintln!("  Unknown command: {}. Type /help.", cmd);
        }
    }
}

fn opt(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "-".into())
}

fn print_details(h: &HotelSuggestion) {
    eprintln!("  {} (id {})", h.name, h.id);
    eprintln!("  Price:  ₹{:.0}/night", h.price_per_night);
    if let Some(rating) = h.rating {
        eprintln!("  Rating: {:.1}", rating);
    }
    if let Some(ref area) = h.area {
        eprintln!("  Area:   {}", area);
    }
}

/// Booking form, submission, then the payment summary.
async fn book_flow(hotel_id: &str, session: &mut Session, state: &mut ChatState) {
    let mut form = match session.open_booking_modal_by_id(hotel_id) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("  {}", e);
            return;
        }
    };

    let summary = loop {
        form = match prompt_booking_form(&form) {
            Ok(Some(filled)) => filled,
            Ok(None) => {
                session.cancel_booking();
                return;
            }
            Err(e) => {
                tracing::warn!("booking form failed: {}", e);
                session.cancel_booking();
                return;
            }
        };
        match session.submit_booking(&form).await {
            // Form stays open; ask again with what the user typed.
            BookingOutcome::Invalid => continue,
            BookingOutcome::Booked(summary) => break summary,
            BookingOutcome::Rejected | BookingOutcome::Failed => return,
        }
    };

    let proceed = inquire::Confirm::new(&format!("Pay ₹{} now?", summary.total_display()))
        .with_default(true)
        .prompt()
        .unwrap_or(false);

    if !proceed {
        session.cancel_payment();
        return;
    }

    if let Some(handle) = session.proceed_with_pending().await {
        state.payment = Some(handle);
        eprintln!("  Type /paid once you've completed payment.");
    }
    session.close_payment_modal();
}

/// Ask for every booking field, pre-filled from `current`.
/// `Ok(None)` means the user backed out.
fn prompt_booking_form(current: &BookingForm) -> anyhow::Result<Option<BookingForm>> {
    let today = chrono::Local::now().date_naive();

    let name = match inquire::Text::new("Full name:")
        .with_initial_value(&current.name)
        .prompt()
    {
        Ok(v) => v,
        Err(e) => return cancelled_or(e),
    };
    let phone = match inquire::Text::new("Phone:")
        .with_initial_value(&current.phone)
        .prompt()
    {
        Ok(v) => v,
        Err(e) => return cancelled_or(e),
    };
    let checkin_date = match inquire::Text::new("Check-in date (YYYY-MM-DD):")
        .with_initial_value(&current.checkin_date)
        .with_validator(move |s: &str| {
            Ok::<_, CustomUserError>(match parse_checkin(s, today) {
                Ok(_) => Validation::Valid,
                Err(msg) => Validation::Invalid(msg.into()),
            })
        })
        .prompt()
    {
        Ok(v) => v,
        Err(e) => return cancelled_or(e),
    };
    let nights = match inquire::CustomType::<u32>::new("Nights:")
        .with_default(current.nights)
        .with_error_message("Enter a whole number")
        .prompt()
    {
        Ok(v) => v,
        Err(e) => return cancelled_or(e),
    };
    let visitors = match inquire::CustomType::<u32>::new("Guests:")
        .with_default(current.visitors)
        .with_error_message("Enter a whole number")
        .prompt()
    {
        Ok(v) => v,
        Err(e) => return cancelled_or(e),
    };

    Ok(Some(BookingForm {
        name,
        phone,
        checkin_date,
        nights,
        visitors,
    }))
}

fn cancelled_or<T>(err: InquireError) -> anyhow::Result<Option<T>> {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => Ok(None),
        other => Err(other.into()),
    }
}

/// Check-in must be a real `YYYY-MM-DD` date no earlier than `today`.
/// Empty input passes so the session can report the missing field.
fn parse_checkin(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| "Use the format YYYY-MM-DD".to_string())?;
    if date < today {
        return Err("Check-in can't be in the past".into());
    }
    Ok(Some(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_checkin_accepts_today_and_later() {
        let today = day("2026-10-16");
        assert_eq!(
            parse_checkin("2026-10-16", today),
            Ok(Some(day("2026-10-16")))
        );
        assert_eq!(
            parse_checkin(" 2027-01-02 ", today),
            Ok(Some(day("2027-01-02")))
        );
    }

    #[test]
    fn test_checkin_rejects_past_and_garbage() {
        let today = day("2026-10-16");
        assert!(parse_checkin("2026-10-15", today).is_err());
        assert!(parse_checkin("16/10/2026", today).is_err());
        assert!(parse_checkin("2026-02-30", today).is_err());
    }

    #[test]
    fn test_checkin_empty_is_left_to_form_validation() {
        assert_eq!(parse_checkin("   ", day("2026-10-16")), Ok(None));
    }

    #[test]
    fn test_opt_formatting() {
        assert_eq!(opt(Some(3)), "3");
        assert_eq!(opt(None), "-");
    }
}
