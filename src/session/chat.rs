// src/session/chat.rs — Sending chat turns and absorbing the reply

use super::notify::{Notification, UiEvent};
use super::Session;
use crate::backend::{ChatRequest, HotelSuggestion};

#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    /// Blank input; nothing was sent or shown.
    Skipped,
    Replied { suggestions: usize },
    Failed,
}

impl Session {
    /// Send one user turn. The user's text is shown before the request goes
    /// out; the typing indicator stays up until the reply or the failure.
    pub async fn send_chat(&mut self, text: &str) -> ChatOutcome {
        if text.trim().is_empty() {
            return ChatOutcome::Skipped;
        }

        self.emit(UiEvent::user(text));
        self.emit(UiEvent::InputCleared);
        self.emit(UiEvent::TypingStarted);

        let request = ChatRequest {
            user_id: self.ctx.user_id.clone(),
            message: text.to_string(),
        };

        match self.backend.chat(&request).await {
            Ok(reply) => {
                self.emit(UiEvent::TypingStopped);
                self.emit(UiEvent::bot(reply.reply.clone()));
                if !reply.suggestions.is_empty() {
                    self.ctx.suggestions.absorb(&reply.suggestions);
                    self.emit(UiEvent::Suggestions(reply.suggestions.clone()));
                }
                if let Some(ref hints) = reply.meta {
                    self.ctx.preferences.merge_hints(hints);
                }
                self.ctx.preferences.absorb_prices(&reply.suggestions);
                tracing::debug!(
                    suggestions = reply.suggestions.len(),
                    known = self.ctx.suggestions.len(),
                    "chat reply"
                );
                ChatOutcome::Replied {
                    suggestions: reply.suggestions.len(),
                }
            }
            Err(e) => {
                tracing::warn!("chat request failed: {}", e);
                self.emit(UiEvent::TypingStopped);
                self.emit(UiEvent::bot(format!(
                    "⚠️ Error connecting to server: {}",
                    e.detail()
                )));
                self.emit(UiEvent::Notify(Notification::error(
                    "Connection error! Please try again.",
                )));
                ChatOutcome::Failed
            }
        }
    }

    /// The card's "Select" action: the hotel id goes back to the server as text.
    pub async fn select_hotel(&mut self, hotel_id: &str) -> ChatOutcome {
        self.send_chat(hotel_id.trim()).await
    }

    /// The card's "Details" action.
    pub fn hotel_details(&self, hotel_id: &str) -> Option<&HotelSuggestion> {
        self.ctx.suggestions.get(hotel_id)
    }
}
