//! Issue label parsing, rendering, and label → forum thread routing.

use crate::sanitize::{escape_html, ELLIPSIS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// How many labels are spelled out before the rest is summarized.
pub const MAX_DISPLAYED_LABELS: usize = 10;

/// Parse a raw `ISSUE_LABELS` value.
///
/// Accepts a JSON array of strings or of objects with a `name` key (the
/// shape of `toJson(github.event.issue.labels)`), or a comma-separated list.
/// A value that looks like JSON but does not decode falls back to CSV.
pub fn parse_labels(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<Value>>(trimmed) {
            return normalize(items.iter().filter_map(label_name));
        }
    }
    normalize(trimmed.split(','))
}

/// Extract a label name from a JSON string or `{"name": ...}` object.
pub(crate) fn label_name(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("name").and_then(Value::as_str),
        _ => None,
    }
}

/// Trim, drop empties, and drop repeats while keeping first-seen order.
pub fn normalize<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim();
        if !label.is_empty() && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

/// Render labels as an escaped, comma-separated line.
///
/// Returns `None` for an empty list.
pub fn render_labels(labels: &[String]) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    let shown: Vec<String> = labels
        .iter()
        .take(MAX_DISPLAYED_LABELS)
        .map(|l| escape_html(l))
        .collect();
    let mut line = shown.join(", ");
    let hidden = labels.len().saturating_sub(MAX_DISPLAYED_LABELS);
    if hidden > 0 {
        line.push_str(&format!(" {ELLIPSIS} (+{hidden})"));
    }
    Some(line)
}

/// Fixed mapping from label name to Telegram forum thread id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadMap(HashMap<String, i64>);

impl ThreadMap {
    /// The topics of the community group chat.
    ///
    /// Thread `0` is the group's General topic: the message is sent without
    /// a `message_thread_id`.
    pub fn builtin() -> Self {
        let entries: &[(&str, i64)] = &[
            ("CDC", 11),
            ("Comunicação", 3),
            ("Designer", 2),
            ("Financeiro", 6),
            ("Local", 9),
            ("Logística", 0),
            ("Palestrantes", 0),
            ("Parcerias", 0),
            ("Patrocínio", 4),
            ("Site", 5),
        ];
        Self(
            entries
                .iter()
                .map(|(name, id)| (name.to_string(), *id))
                .collect(),
        )
    }

    /// Thread mapped to a single label, if any.
    pub fn get(&self, label: &str) -> Option<i64> {
        self.0.get(label.trim()).copied()
    }

    /// Thread for the first mapped label, else `default`.
    pub fn resolve(&self, labels: &[String], default: i64) -> i64 {
        labels
            .iter()
            .find_map(|l| self.get(l))
            .unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ThreadMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl From<HashMap<String, i64>> for ThreadMap {
    fn from(map: HashMap<String, i64>) -> Self {
        Self(map)
    }
}
