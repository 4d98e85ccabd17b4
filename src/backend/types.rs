// src/backend/types.rs — Request/response bodies for the booking backend

use serde::{Deserialize, Deserializer, Serialize};

// ── Chat ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<HotelSuggestion>,
    #[serde(default)]
    pub meta: Option<PreferenceHints>,
}

/// Preference hints extracted by the server from the conversation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PreferenceHints {
    #[serde(default)]
    pub nights: Option<u32>,
    #[serde(default)]
    pub visitors: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelSuggestion {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(alias = "price")]
    pub price_per_night: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub area: Option<String>,
}

// ── Booking ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub hotel_id: String,
    pub checkin_date: String,
    pub nights: u32,
    pub visitors: u32,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingResult {
    pub bill: String,
    pub hotel: BookedHotel,
    pub total_price: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub booking_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookedHotel {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Payment ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntentRequest {
    pub amount_inr: i64,
    pub currency: String,
    pub description: String,
    pub booking_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub payment_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceRequest {
    pub booking_id: String,
    pub gst_percent: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    #[serde(deserialize_with = "string_or_number")]
    pub invoice_id: String,
}

// ── Admin ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversations: Vec<ConversationRecord>,
    #[serde(default)]
    pub count: Option<u64>,
}

// ── Catalogue ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelCatalogue {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hotels: Vec<HotelSuggestion>,
}

// ── Serde helpers ────────────────────────────────────────────────

/// The backend is loose about ids: some rows carry integers, others strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(i) => i.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
