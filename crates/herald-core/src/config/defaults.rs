//! Default value functions used by serde for config deserialization.

/// Community group chat that receives notifications unless overridden.
pub const DEFAULT_CHAT_ID: &str = "-1001234567890";

/// Forum topic used when no label maps to a thread.
pub const DEFAULT_THREAD_ID: i64 = 27;

pub fn default_chat_id() -> String {
    DEFAULT_CHAT_ID.to_string()
}

pub fn default_thread_id() -> i64 {
    DEFAULT_THREAD_ID
}

pub fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_timeout_secs() -> u64 {
    20
}
