mod defaults;


pub use defaults::{DEFAULT_CHAT_ID, DEFAULT_THREAD_ID};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HeraldError;
use crate::labels::ThreadMap;
use defaults::*;

/// Optional on-disk configuration (`herald.toml`).
///
/// Every value here is overridden by its environment variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Replaces the built-in label map when present.
    #[serde(default)]
    pub threads: Option<ThreadMap>,
}

/// Telegram destination and client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Usually left empty here and supplied as `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub bot_token: String,
    #[serde(default = "default_chat_id")]
    pub chat_id: String,
    #[serde(default = "default_thread_id")]
    pub default_thread_id: i64,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: default_chat_id(),
            default_thread_id: default_thread_id(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: String,
    /// Thread used when no label maps to one.
    pub default_thread_id: i64,
    /// `MESSAGE`: sent verbatim instead of the issue template.
    pub message: Option<String>,
    /// `APPEND_LABELS_TO_MESSAGE`: add the labels line to `message`.
    pub append_labels: bool,
    pub api_base: String,
    pub timeout_secs: u64,
    pub threads: ThreadMap,
}

impl Config {
    /// Resolve from the process environment and built-in defaults.
    pub fn from_env() -> Result<Self, HeraldError> {
        Self::from_lookup(env_lookup)
    }

    /// Resolve through `lookup` and built-in defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HeraldError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(FileConfig::default(), lookup)
    }

    /// Layer environment values (via `lookup`) over `file`.
    ///
    /// Fails when no bot token is available or `TELEGRAM_THREAD_ID` is not
    /// an integer.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self, HeraldError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let tg = file.telegram;

        let bot_token = get("TELEGRAM_BOT_TOKEN")
            .or_else(|| Some(tg.bot_token.trim().to_string()).filter(|t| !t.is_empty()))
            .ok_or_else(|| HeraldError::Config("TELEGRAM_BOT_TOKEN is not set".into()))?;

        let default_thread_id = match get("TELEGRAM_THREAD_ID") {
            Some(raw) => raw.parse::<i64>().map_err(|e| {
                HeraldError::Config(format!("TELEGRAM_THREAD_ID '{raw}' is not an integer: {e}"))
            })?,
            None => tg.default_thread_id,
        };

        // The override is sent verbatim, so only a blank value counts as unset.
        let message = lookup("MESSAGE").filter(|m| !m.trim().is_empty());

        Ok(Self {
            bot_token,
            chat_id: get("TELEGRAM_CHAT_ID").unwrap_or(tg.chat_id),
            default_thread_id,
            message,
            append_labels: get("APPEND_LABELS_TO_MESSAGE")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            api_base: tg.api_base.trim_end_matches('/').to_string(),
            timeout_secs: tg.timeout_secs,
            threads: file.threads.unwrap_or_default(),
        })
    }
}

/// Read a variable from the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// `1`, `true`, `yes`, `on` in any case.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<FileConfig, HeraldError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| HeraldError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: FileConfig = toml::from_str(&content)
        .map_err(|e| HeraldError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
