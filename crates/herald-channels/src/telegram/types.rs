//! Telegram Bot API request and response types.

use herald_core::message::OutboundMessage;
use serde::Serialize;
use serde_json::Value;

/// Form body of `sendMessage`.
#[derive(Debug, Serialize)]
pub(crate) struct SendMessageForm<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i64>,
}

impl<'a> From<&'a OutboundMessage> for SendMessageForm<'a> {
    fn from(message: &'a OutboundMessage) -> Self {
        Self {
            chat_id: &message.chat_id,
            text: &message.text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
            message_thread_id: message.thread(),
        }
    }
}

/// Decode a response body.
///
/// JSON content types are parsed; anything else, or JSON that does not
/// parse, is wrapped as `{"raw": text}`.
pub(crate) fn decode_body(content_type: &str, text: &str) -> Value {
    if content_type.starts_with("application/json") {
        if let Ok(value) = serde_json::from_str::<Value>(text) {
            return value;
        }
    }
    serde_json::json!({ "raw": text })
}
