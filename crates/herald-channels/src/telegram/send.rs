//! Message sending.

use super::types::{decode_body, SendMessageForm};
use super::TelegramChannel;
use herald_core::{error::HeraldError, message::OutboundMessage, traits::Delivery};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, info};

impl TelegramChannel {
    /// Send a text message. Exactly one request.
    ///
    /// Accepted only on a 2xx status with `"ok": true` in the body.
    pub(crate) async fn send_message(
        &self,
        message: &OutboundMessage,
    ) -> Result<Delivery, HeraldError> {
        let url = format!("{}/sendMessage", self.base_url);
        let form = SendMessageForm::from(message);
        debug!(
            "POST {} chat_id={} thread={:?}",
            self.redacted("sendMessage"),
            form.chat_id,
            form.message_thread_id
        );

        // reqwest errors embed the request URL, which carries the token.
        let resp = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                HeraldError::Channel(format!("telegram send failed: {}", e.without_url()))
            })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = resp.text().await.map_err(|e| {
            HeraldError::Channel(format!("telegram response read failed: {}", e.without_url()))
        })?;
        let data = decode_body(&content_type, &text);

        // Only `ok` decides; `result` varies by method and may not be an object.
        let ok = data.get("ok").and_then(Value::as_bool) == Some(true);

        if !status.is_success() || !ok {
            let description = data["description"].as_str().unwrap_or("no description");
            error!("telegram sendMessage rejected ({status}): {description}");
            return Err(HeraldError::Delivery {
                status: status.as_u16(),
                body: data.to_string(),
            });
        }

        let message_id = data.pointer("/result/message_id").and_then(Value::as_i64);
        info!(
            "telegram message delivered to {} (thread {:?}, message_id {:?})",
            message.chat_id,
            message.thread(),
            message_id
        );

        Ok(Delivery {
            message_id,
            response: data,
        })
    }
}
