use crate::{error::HeraldError, message::OutboundMessage};
use async_trait::async_trait;

/// Outcome of an accepted delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    /// Platform message id, when the API reports one.
    pub message_id: Option<i64>,
    /// Decoded response body.
    pub response: serde_json::Value,
}

/// Messaging channel that can deliver one outbound notification.
///
/// Every platform (currently only Telegram) implements this so the binary
/// does not depend on a concrete transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Deliver the message. Exactly one request, no retries.
    async fn send(&self, message: &OutboundMessage) -> Result<Delivery, HeraldError>;
}
