// src/session/payment.rs — Payment summary, payment intent, invoice follow-up

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::notify::{Notification, UiEvent, UiSink};
use super::Session;
use crate::backend::{Backend, BookingResult, InvoiceRequest, PaymentIntentRequest};

/// Amounts shown in the payment modal.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSummary {
    pub hotel_name: String,
    pub booking_id: String,
    pub subtotal: f64,
    pub gst: f64,
    pub total: f64,
}

impl PaymentSummary {
    pub fn compute(result: &BookingResult, gst_percent: u32) -> Self {
        let subtotal = result.total_price;
        let gst = subtotal * (gst_percent as f64 / 100.0);
        Self {
            hotel_name: result.hotel.name.clone(),
            booking_id: result.booking_id.clone(),
            subtotal,
            gst,
            total: subtotal + gst,
        }
    }

    pub fn subtotal_display(&self) -> String {
        format!("{:.2}", self.subtotal)
    }

    pub fn gst_display(&self) -> String {
        format!("{:.2}", self.gst)
    }

    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total)
    }

    /// Whole-rupee amount sent to the payment gateway.
    pub fn amount_inr(&self) -> i64 {
        self.total.round() as i64
    }
}

/// Returned when a payment link is ready. The invoice is requested once
/// `confirm_paid` is called or the fallback delay runs out.
pub struct PaymentHandle {
    pub payment_url: String,
    confirm: Option<oneshot::Sender<()>>,
    invoice_task: JoinHandle<()>,
}

impl PaymentHandle {
    /// Signal that the guest completed payment; the invoice is requested now.
    pub fn confirm_paid(&mut self) {
        if let Some(tx) = self.confirm.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the invoice follow-up to finish (successfully or not).
    pub async fn finished(self) {
        if let Err(e) = self.invoice_task.await {
            tracing::debug!("invoice task ended abnormally: {}", e);
        }
    }
}

impl Session {
    /// Open the payment summary for a fresh booking.
    pub fn show_payment_modal(&mut self, result: BookingResult) -> PaymentSummary {
        let summary = PaymentSummary::compute(&result, self.payment.gst_percent);
        self.ctx.pending_booking = Some(result);
        self.emit(UiEvent::PaymentModalOpened(summary.clone()));
        summary
    }

    pub fn close_payment_modal(&mut self) {
        self.ctx.pending_booking = None;
    }

    /// User dismissed the payment summary.
    pub fn cancel_payment(&mut self) {
        self.close_payment_modal();
        self.emit(UiEvent::bot("❌ Payment cancelled."));
    }

    /// Pay for the booking shown in the payment summary, if any.
    pub async fn proceed_with_pending(&mut self) -> Option<PaymentHandle> {
        let result = self.ctx.pending_booking.clone()?;
        self.proceed_to_payment(&result).await
    }

    /// Request a payment intent for `result`. On success the link is
    /// published and the invoice follow-up is armed.
    pub async fn proceed_to_payment(&mut self, result: &BookingResult) -> Option<PaymentHandle> {
        let summary = PaymentSummary::compute(result, self.payment.gst_percent);
        self.emit(UiEvent::bot("💳 Creating payment intent..."));

        let request = PaymentIntentRequest {
            amount_inr: summary.amount_inr(),
            currency: self.payment.currency.clone(),
            description: format!("Booking for {}", summary.hotel_name),
            booking_id: summary.booking_id.clone(),
        };

        let intent = match self.backend.create_payment_intent(&request).await {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!("payment intent failed: {}", e);
                let detail = if e.is_rejected() {
                    "Payment intent creation failed".to_string()
                } else {
                    e.detail()
                };
                self.emit(UiEvent::bot(format!("❌ Payment error: {}", detail)));
                self.emit(UiEvent::Notify(Notification::error("Payment setup failed!")));
                return None;
            }
        };

        self.emit(UiEvent::PaymentLink(intent.payment_url.clone()));
        self.emit(UiEvent::bot(
            "✅ Payment gateway ready! Click the payment link to complete payment.",
        ));
        self.emit(UiEvent::Notify(Notification::info(
            "Payment intent created. Click the payment link!",
        )));

        let (tx, rx) = oneshot::channel();
        let invoice_task = spawn_invoice_follow_up(
            self.backend.clone(),
            self.sink.clone(),
            InvoiceRequest {
                booking_id: summary.booking_id,
                gst_percent: self.payment.gst_percent,
            },
            rx,
            self.payment.invoice_delay(),
        );

        Some(PaymentHandle {
            payment_url: intent.payment_url,
            confirm: Some(tx),
            invoice_task,
        })
    }
}

/// Request the invoice once payment is confirmed, or after `fallback`
/// elapses without confirmation. Failures are logged, never shown.
fn spawn_invoice_follow_up(
    backend: Arc<dyn Backend>,
    sink: UiSink,
    request: InvoiceRequest,
    confirmed: oneshot::Receiver<()>,
    fallback: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            Ok(()) = confirmed => {
                tracing::debug!(booking_id = %request.booking_id, "payment confirmed");
            }
            _ = tokio::time::sleep(fallback) => {
                tracing::debug!(booking_id = %request.booking_id, "no payment signal, using fallback delay");
            }
        }

        match backend.generate_invoice(&request).await {
            Ok(invoice) => {
                sink(UiEvent::bot(format!(
                    "📄 Invoice generated: {}",
                    invoice.invoice_id
                )));
                sink(UiEvent::bot(
                    "✅ Booking complete! Check your email for invoice and payment details.",
                ));
            }
            Err(e) => {
                tracing::warn!("Invoice generation skipped: {}", e);
            }
        }
    })
}
