// src/backend/http.rs — JSON-over-HTTP backend (reqwest)

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    AdminLoginRequest, AdminToken, Backend, BookingRequest, BookingResult, ChatReply, ChatRequest,
    ConversationPage, HotelCatalogue, Invoice, InvoiceRequest, PaymentIntent,
    PaymentIntentRequest,
};
use crate::infra::config::ServerConfig;
use crate::infra::errors::ClientError;

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        tracing::debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(path, e))?;
        decode(path, response).await
    }

    async fn get_json<R>(&self, request: reqwest::RequestBuilder, path: &str) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        tracing::debug!("GET {}", path);
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(path, e))?;
        decode(path, response).await
    }
}

/// Map non-2xx to `Rejected` carrying the raw body, otherwise parse JSON.
async fn decode<R: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<R, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("{} rejected with {}", endpoint, status);
        return Err(ClientError::Rejected {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| ClientError::from_reqwest(endpoint, e))?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.post_json("/chat", request).await
    }

    async fn book(&self, request: &BookingRequest) -> Result<BookingResult, ClientError> {
        self.post_json("/book", request).await
    }

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ClientError> {
        self.post_json("/internal/payment_intent", request).await
    }

    async fn generate_invoice(&self, request: &InvoiceRequest) -> Result<Invoice, ClientError> {
        self.post_json("/internal/generate_invoice", request).await
    }

    async fn admin_login(&self, request: &AdminLoginRequest) -> Result<AdminToken, ClientError> {
        self.post_json("/admin/login", request).await
    }

    async fn admin_chats(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<ConversationPage, ClientError> {
        let request = self
            .client
            .get(self.url("/admin/chats"))
            .query(&[("limit", limit)])
            .bearer_auth(token);
        self.get_json(request, "/admin/chats").await
    }

    async fn hotels(&self, max_price: Option<u32>) -> Result<HotelCatalogue, ClientError> {
        let mut request = self.client.get(self.url("/hotels"));
        if let Some(max) = max_price {
            request = request.query(&[("max_price", max)]);
        }
        self.get_json(request, "/hotels").await
    }

    async fn conversations(&self, user_id: &str) -> Result<ConversationPage, ClientError> {
        let mut url = url::Url::parse(&self.url("/conversations/"))
            .map_err(|e| ClientError::Config(format!("invalid base_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base_url cannot be a base".into()))?
            .pop_if_empty()
            .push(user_id);
        let request = self.client.get(url);
        self.get_json(request, "/conversations").await
    }
}
