// src/session/booking.rs — Booking form and reservation submission

use super::notify::{Notification, UiEvent};
use super::payment::PaymentSummary;
use super::Session;
use crate::backend::{BookingRequest, HotelSuggestion};
use crate::infra::errors::ClientError;

/// Values of the booking form as the user left them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    /// Check-in date, `YYYY-MM-DD`.
    pub checkin_date: String,
    pub nights: u32,
    pub visitors: u32,
}

impl BookingForm {
    /// Every field filled and non-zero. Returns the trimmed copy to submit.
    pub fn validated(&self) -> Result<BookingForm, ClientError> {
        let form = BookingForm {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            checkin_date: self.checkin_date.trim().to_string(),
            nights: self.nights,
            visitors: self.visitors,
        };
        if form.name.is_empty()
            || form.phone.is_empty()
            || form.checkin_date.is_empty()
            || form.nights == 0
            || form.visitors == 0
        {
            return Err(ClientError::validation("❌ Please fill in all fields!"));
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    /// Blocked before any request; the form stays open.
    Invalid,
    /// Reservation made; the payment summary is open.
    Booked(PaymentSummary),
    /// Server refused the booking.
    Rejected,
    /// Server unreachable or answered garbage.
    Failed,
}

impl Session {
    /// Open the booking form for `hotel`, pre-filled from known preferences.
    pub fn open_booking_modal(&mut self, hotel: HotelSuggestion) -> BookingForm {
        let form = BookingForm {
            nights: self.ctx.preferences.nights.unwrap_or(1),
            visitors: self.ctx.preferences.visitors.unwrap_or(1),
            ..Default::default()
        };
        tracing::debug!(hotel_id = %hotel.id, "booking form opened");
        self.ctx.pending_hotel = Some(hotel);
        form
    }

    /// Open the booking form for a hotel the server suggested earlier.
    pub fn open_booking_modal_by_id(&mut self, hotel_id: &str) -> Result<BookingForm, ClientError> {
        let hotel = self
            .ctx
            .suggestions
            .get(hotel_id)
            .cloned()
            .ok_or_else(|| {
                ClientError::validation(format!("No suggested hotel with id '{}'", hotel_id.trim()))
            })?;
        Ok(self.open_booking_modal(hotel))
    }

    pub fn close_booking_modal(&mut self) {
        self.ctx.pending_hotel = None;
    }

    /// User dismissed the form.
    pub fn cancel_booking(&mut self) {
        self.close_booking_modal();
        self.emit(UiEvent::bot("❌ Booking cancelled."));
    }

    /// Validate and submit the open booking form.
    ///
    /// An invalid form leaves the pending hotel in place so the user can fix
    /// it. Any submission that passes validation closes the form first.
    pub async fn submit_booking(&mut self, form: &BookingForm) -> BookingOutcome {
        let checked = form
            .validated()
            .and_then(|f| match self.ctx.pending_hotel.clone() {
                Some(hotel) => Ok((f, hotel)),
                None => Err(ClientError::validation("❌ Please fill in all fields!")),
            });
        let (form, hotel) = match checked {
            Ok(v) => v,
            Err(e) => {
                self.emit(UiEvent::Notify(Notification::error(e.to_string())));
                return BookingOutcome::Invalid;
            }
        };

        self.ctx.preferences.nights = Some(form.nights);
        self.ctx.preferences.visitors = Some(form.visitors);
        self.close_booking_modal();
        self.emit(UiEvent::bot(format!(
            "🔄 Confirming your booking for {}...",
            hotel.name
        )));

        let request = BookingRequest {
            name: form.name,
            phone: form.phone,
            hotel_id: hotel.id.clone(),
            checkin_date: form.checkin_date,
            nights: form.nights,
            visitors: form.visitors,
            user_id: self.ctx.user_id.clone(),
        };

        match self.backend.book(&request).await {
            Ok(result) => {
                tracing::info!(booking_id = %result.booking_id, "booking confirmed");
                self.emit(UiEvent::bot(result.bill.clone()));
                let summary = self.show_payment_modal(result);
                self.emit(UiEvent::Notify(Notification::info(
                    "Opening payment details...",
                )));
                BookingOutcome::Booked(summary)
            }
            Err(e) if e.is_rejected() => {
                tracing::warn!("booking rejected: {}", e);
                self.emit(UiEvent::bot(format!("❌ Booking failed: {}", e.detail())));
                self.emit(UiEvent::Notify(Notification::error("Booking failed!")));
                BookingOutcome::Rejected
            }
            Err(e) => {
                tracing::warn!("booking request failed: {}", e);
                self.emit(UiEvent::bot(format!("❌ Booking error: {}", e.detail())));
                self.emit(UiEvent::Notify(Notification::error("Booking error!")));
                BookingOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> BookingForm {
        BookingForm {
            name: "  Alice ".into(),
            phone: "555".into(),
            checkin_date: "2025-01-01".into(),
            nights: 2,
            visitors: 1,
        }
    }

    #[test]
    fn test_validated_trims() {
        let f = filled().validated().unwrap();
        assert_eq!(f.name, "Alice");
    }

    #[test]
    fn test_each_missing_field_rejected() {
        let cases: Vec<Box<dyn Fn(&mut BookingForm)>> = vec![
            Box::new(|f| f.name = "   ".into()),
            Box::new(|f| f.phone = String::new()),
            Box::new(|f| f.checkin_date = String::new()),
            Box::new(|f| f.nights = 0),
            Box::new(|f| f.visitors = 0),
        ];
        for mutate in cases {
            let mut f = filled();
            mutate(&mut f);
            assert!(f.validated().is_err(), "accepted {:?}", f);
        }
    }
}
