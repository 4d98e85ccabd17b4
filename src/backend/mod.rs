// src/backend/mod.rs — Booking backend client layer

pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::infra::errors::ClientError;
pub use http::HttpBackend;
pub use types::*;

/// Every call the client makes to the booking server goes through this trait.
/// `HttpBackend` talks JSON over HTTP; tests substitute canned responses.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;

    /// `POST /book`
    async fn book(&self, request: &BookingRequest) -> Result<BookingResult, ClientError>;

    /// `POST /internal/payment_intent`
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ClientError>;

    /// `POST /internal/generate_invoice`
    async fn generate_invoice(&self, request: &InvoiceRequest) -> Result<Invoice, ClientError>;

    /// `POST /admin/login`
    async fn admin_login(&self, request: &AdminLoginRequest) -> Result<AdminToken, ClientError>;

    /// `GET /admin/chats?limit=N` with a bearer token.
    async fn admin_chats(&self, token: &str, limit: u32)
        -> Result<ConversationPage, ClientError>;

    /// `GET /hotels[?max_price=N]`
    async fn hotels(&self, max_price: Option<u32>) -> Result<HotelCatalogue, ClientError>;

    /// `GET /conversations/{user_id}`
    async fn conversations(&self, user_id: &str) -> Result<ConversationPage, ClientError>;
}
