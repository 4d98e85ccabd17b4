// src/session/mod.rs — Chat/booking/payment session state and flows
//
// `SessionContext` holds everything a guest session remembers between
// turns. `Session` pairs it with a backend and a UI sink; the flow methods
// live in the submodules (chat, booking, payment).

pub mod admin;
pub mod booking;
pub mod chat;
pub mod inbox;
pub mod notify;
pub mod payment;

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::{Backend, BookingResult, HotelSuggestion, PreferenceHints};
use crate::infra::config::PaymentConfig;
use notify::{UiEvent, UiSink};

pub use booking::{BookingForm, BookingOutcome};
pub use chat::ChatOutcome;
pub use payment::{PaymentHandle, PaymentSummary};

/// What we know about the guest's trip so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceState {
    pub nights: Option<u32>,
    pub budget: Option<f64>,
    pub visitors: Option<u32>,
}

impl PreferenceState {
    /// Overwrite only the fields the server actually sent. Zero counts as absent.
    pub fn merge_hints(&mut self, hints: &PreferenceHints) {
        if let Some(n) = hints.nights.filter(|n| *n > 0) {
            self.nights = Some(n);
        }
        if let Some(v) = hints.visitors.filter(|v| *v > 0) {
            self.visitors = Some(v);
        }
    }

    /// Budget follows the nightly price of the suggestions; the last priced one wins.
    pub fn absorb_prices(&mut self, suggestions: &[HotelSuggestion]) {
        for s in suggestions {
            if s.price_per_night > 0.0 {
                self.budget = Some(s.price_per_night);
            }
        }
    }
}

/// Every suggestion the server has offered during this session, by id.
///
/// Entries are inserted or overwritten, never evicted, so hotel ids quoted
/// in earlier replies stay bookable.
#[derive(Debug, Clone, Default)]
pub struct SuggestionTable {
    by_id: HashMap<String, HotelSuggestion>,
}

impl SuggestionTable {
    pub fn absorb(&mut self, suggestions: &[HotelSuggestion]) {
        for s in suggestions {
            self.by_id.insert(s.id.clone(), s.clone());
        }
    }

    pub fn get(&self, id: &str) -> Option<&HotelSuggestion> {
        self.by_id.get(id.trim())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All known suggestions sorted by id, for listing.
    pub fn all(&self) -> Vec<&HotelSuggestion> {
        let mut v: Vec<_> = self.by_id.values().collect();
        v.sort_by(|a, b| a.id.cmp(&b.id));
        v
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user_id: String,
    pub preferences: PreferenceState,
    pub suggestions: SuggestionTable,
    /// Hotel whose booking form is open. Submission is only valid while set.
    pub pending_hotel: Option<HotelSuggestion>,
    /// Booking whose payment summary is open.
    pub pending_booking: Option<BookingResult>,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

pub struct Session {
    backend: Arc<dyn Backend>,
    ctx: SessionContext,
    sink: UiSink,
    payment: PaymentConfig,
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>, user_id: impl Into<String>, sink: UiSink) -> Self {
        Self {
            backend,
            ctx: SessionContext::new(user_id),
            sink,
            payment: PaymentConfig::default(),
        }
    }

    pub fn with_payment_config(mut self, payment: PaymentConfig) -> Self {
        self.payment = payment;
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn user_id(&self) -> &str {
        &self.ctx.user_id
    }

    pub fn preferences(&self) -> &PreferenceState {
        &self.ctx.preferences
    }

    pub fn pending_hotel(&self) -> Option<&HotelSuggestion> {
        self.ctx.pending_hotel.as_ref()
    }

    pub fn pending_booking(&self) -> Option<&BookingResult> {
        self.ctx.pending_booking.as_ref()
    }

    pub(crate) fn emit(&self, event: UiEvent) {
        (self.sink)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(id: &str, price: f64) -> HotelSuggestion {
        HotelSuggestion {
            id: id.into(),
            name: format!("Hotel {id}"),
            price_per_night: price,
            rating: Some(4.0),
            area: None,
        }
    }

    #[test]
    fn test_merge_hints_only_present_fields() {
        let mut p = PreferenceState {
            nights: Some(2),
            budget: Some(3000.0),
            visitors: Some(3),
        };
        p.merge_hints(&PreferenceHints {
            nights: Some(4),
            visitors: None,
        });
        assert_eq!(p.nights, Some(4));
        assert_eq!(p.visitors, Some(3));
        assert_eq!(p.budget, Some(3000.0));
    }

    #[test]
    fn test_merge_hints_zero_ignored() {
        let mut p = PreferenceState::default();
        p.merge_hints(&PreferenceHints {
            nights: Some(0),
            visitors: Some(2),
        });
        assert_eq!(p.nights, None);
        assert_eq!(p.visitors, Some(2));
    }

    #[test]
    fn test_absorb_prices_last_wins() {
        let mut p = PreferenceState::default();
        p.absorb_prices(&[hotel("1", 5200.0), hotel("2", 0.0), hotel("3", 4000.0)]);
        assert_eq!(p.budget, Some(4000.0));
    }

    #[test]
    fn test_suggestion_table_accumulates() {
        let mut t = SuggestionTable::default();
        t.absorb(&[hotel("1", 100.0), hotel("2", 200.0)]);
        t.absorb(&[hotel("2", 250.0), hotel("3", 300.0)]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.get("1").unwrap().price_per_night, 100.0);
        assert_eq!(t.get("2").unwrap().price_per_night, 250.0);
        assert_eq!(t.get(" 3 ").unwrap().id, "3");
        let ids: Vec<_> = t.all().iter().map(|h| h.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
