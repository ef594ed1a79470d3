//! Issue data from the CI environment and the GitHub event payload file.

use crate::labels::{label_name, normalize, parse_labels};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Snapshot of the issue that triggered the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSnapshot {
    pub title: Option<String>,
    pub number: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub repo: Option<String>,
    pub labels: Vec<String>,
}

impl IssueSnapshot {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(crate::config::env_lookup)
    }

    /// Read through `lookup`, filling absent fields from `GITHUB_EVENT_PATH`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut issue = Self {
            title: get("ISSUE_TITLE"),
            number: get("ISSUE_NUMBER"),
            url: get("ISSUE_URL"),
            author: get("ISSUE_USER"),
            body: get("ISSUE_BODY"),
            repo: get("REPO"),
            labels: get("ISSUE_LABELS")
                .map(|raw| parse_labels(&raw))
                .unwrap_or_default(),
        };

        if let Some(path) = get("GITHUB_EVENT_PATH") {
            let payload = EventPayload::read(Path::new(&path));
            issue.fill_from(payload);
        }
        issue
    }

    /// Fill every field still absent with the payload's value.
    fn fill_from(&mut self, payload: EventPayload) {
        self.title = self.title.take().or(payload.title);
        self.number = self.number.take().or(payload.number);
        self.url = self.url.take().or(payload.url);
        self.author = self.author.take().or(payload.author);
        self.body = self.body.take().or(payload.body);
        self.repo = self.repo.take().or(payload.repo);
        if self.labels.is_empty() {
            self.labels = payload.labels;
        }
    }

    /// Whether any field worth rendering is present (labels alone are not).
    pub fn has_content(&self) -> bool {
        [
            &self.title,
            &self.number,
            &self.url,
            &self.author,
            &self.repo,
            &self.body,
        ]
        .iter()
        .any(|f| f.is_some())
    }
}

/// Fields extracted from a GitHub `issues` event payload.
#[derive(Debug, Default)]
pub(crate) struct EventPayload {
    title: Option<String>,
    number: Option<String>,
    url: Option<String>,
    author: Option<String>,
    body: Option<String>,
    repo: Option<String>,
    labels: Vec<String>,
}

impl EventPayload {
    /// Read the payload file. Any failure yields an empty payload.
    pub(crate) fn read(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                debug!("event payload {} unreadable: {e}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                debug!("event payload {} is not JSON: {e}", path.display());
                Self::default()
            }
        }
    }

    pub(crate) fn from_value(event: &Value) -> Self {
        let issue = &event["issue"];
        let text = |v: &Value| -> Option<String> {
            match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        };
        let labels = issue["labels"]
            .as_array()
            .map(|items| normalize(items.iter().filter_map(label_name)))
            .unwrap_or_default();

        Self {
            title: text(&issue["title"]),
            number: text(&issue["number"]),
            url: text(&issue["html_url"]),
            author: text(&issue["user"]["login"]),
            body: text(&issue["body"]),
            repo: text(&event["repository"]["full_name"]),
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn event_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const EVENT: &str = r#"{
        "action": "opened",
        "issue": {
            "title": "Palco novo",
            "number": 42,
            "html_url": "https://github.com/org/site/issues/42",
            "user": {"login": "maria"},
            "body": "Precisamos de um palco.",
            "labels": [{"name": "Local"}, {"name": "CDC"}, {"name": "Local"}]
        },
        "repository": {"full_name": "org/site"}
    }"#;

    #[test]
    fn test_env_only() {
        let issue = IssueSnapshot::from_lookup(lookup(&[
            ("ISSUE_TITLE", "Crash"),
            ("ISSUE_NUMBER", "7"),
            ("ISSUE_LABELS", "bug,Site"),
            ("ISSUE_BODY", "   "),
        ]));
        assert_eq!(issue.title.as_deref(), Some("Crash"));
        assert_eq!(issue.number.as_deref(), Some("7"));
        assert!(issue.body.is_none(), "blank values count as unset");
        assert_eq!(issue.labels, vec!["bug", "Site"]);
    }

    #[test]
    fn test_event_payload_fills_missing_fields() {
        let file = event_file(EVENT);
        let path = file.path().to_str().unwrap().to_string();
        let issue = IssueSnapshot::from_lookup(lookup(&[
            ("ISSUE_TITLE", "Override"),
            ("GITHUB_EVENT_PATH", path.as_str()),
        ]));
        assert_eq!(issue.title.as_deref(), Some("Override"));
        assert_eq!(issue.number.as_deref(), Some("42"));
        assert_eq!(issue.author.as_deref(), Some("maria"));
        assert_eq!(issue.repo.as_deref(), Some("org/site"));
        assert_eq!(
            issue.url.as_deref(),
            Some("https://github.com/org/site/issues/42")
        );
        assert_eq!(issue.labels, vec!["Local", "CDC"]);
    }

    #[test]
    fn test_env_labels_take_precedence_over_payload() {
        let file = event_file(EVENT);
        let path = file.path().to_str().unwrap().to_string();
        let issue = IssueSnapshot::from_lookup(lookup(&[
            ("ISSUE_LABELS", r#"["Site"]"#),
            ("GITHUB_EVENT_PATH", path.as_str()),
        ]));
        assert_eq!(issue.labels, vec!["Site"]);
    }

    #[test]
    fn test_missing_event_file_is_swallowed() {
        let issue = IssueSnapshot::from_lookup(lookup(&[(
            "GITHUB_EVENT_PATH",
            "/nonexistent/__herald_event__.json",
        )]));
        assert_eq!(issue, IssueSnapshot::default());
    }

    #[test]
    fn test_garbage_event_file_is_swallowed() {
        let file = event_file("not json at all");
        let path = file.path().to_str().unwrap().to_string();
        let issue = IssueSnapshot::from_lookup(lookup(&[("GITHUB_EVENT_PATH", path.as_str())]));
        assert!(issue.labels.is_empty());
        assert!(!issue.has_content());
    }

    #[test]
    fn test_payload_without_issue_is_empty() {
        let payload = EventPayload::from_value(&serde_json::json!({"action": "push"}));
        assert!(payload.title.is_none());
        assert!(payload.labels.is_empty());
    }

    #[test]
    fn test_has_content_ignores_labels() {
        let issue = IssueSnapshot {
            labels: vec!["CDC".into()],
            ..Default::default()
        };
        assert!(!issue.has_content());
        let issue = IssueSnapshot {
            repo: Some("org/site".into()),
            ..Default::default()
        };
        assert!(issue.has_content());
    }
}
