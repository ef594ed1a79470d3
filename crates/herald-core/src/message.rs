//! Builds the notification text and its routing.

use crate::config::Config;
use crate::event::IssueSnapshot;
use crate::labels::render_labels;
use crate::sanitize::{escape_html, truncate_chars};

/// Body preview cap, in characters.
pub const BODY_PREVIEW_CHARS: usize = 700;

/// Sent when there is neither an override nor any issue data.
pub const EMPTY_PLACEHOLDER: &str = "(no content)";

/// A formatted message plus where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: String,
    /// Forum topic; `0` means the chat's General topic.
    pub thread_id: i64,
    /// Telegram HTML.
    pub text: String,
}

impl OutboundMessage {
    /// Thread id to put on the wire, `None` for the General topic.
    pub fn thread(&self) -> Option<i64> {
        (self.thread_id != 0).then_some(self.thread_id)
    }
}

/// Build the message for `issue` and resolve its destination.
pub fn build(config: &Config, issue: &IssueSnapshot) -> OutboundMessage {
    OutboundMessage {
        chat_id: config.chat_id.clone(),
        thread_id: config
            .threads
            .resolve(&issue.labels, config.default_thread_id),
        text: build_text(config, issue),
    }
}

/// The message text alone.
pub fn build_text(config: &Config, issue: &IssueSnapshot) -> String {
    if let Some(ref message) = config.message {
        let mut text = message.clone();
        if config.append_labels {
            if let Some(line) = render_labels(&issue.labels) {
                text.push_str("\n\n");
                text.push_str(&labels_line(&line));
            }
        }
        return text;
    }

    if issue.has_content() {
        render_issue(issue)
    } else {
        EMPTY_PLACEHOLDER.to_string()
    }
}

fn labels_line(rendered: &str) -> String {
    format!("🏷️ {rendered}")
}

fn render_issue(issue: &IssueSnapshot) -> String {
    let mut lines: Vec<String> = Vec::new();

    match issue.repo {
        Some(ref repo) => lines.push(format!(
            "📌 <b>New issue</b> in <code>{}</code>",
            escape_html(repo)
        )),
        None => lines.push("📌 <b>New issue</b>".to_string()),
    }

    let heading = match (&issue.number, &issue.title) {
        (Some(n), Some(t)) => Some(format!("#{}: {}", escape_html(n), escape_html(t))),
        (Some(n), None) => Some(format!("#{}", escape_html(n))),
        (None, Some(t)) => Some(escape_html(t)),
        (None, None) => None,
    };
    if let Some(heading) = heading {
        lines.push(format!("<b>{heading}</b>"));
    }

    if let Some(ref author) = issue.author {
        lines.push(format!("👤 {}", escape_html(author)));
    }
    if let Some(line) = render_labels(&issue.labels) {
        lines.push(labels_line(&line));
    }
    if let Some(ref url) = issue.url {
        lines.push(format!(
            "🔗 <a href=\"{}\">Open issue</a>",
            escape_html(url)
        ));
    }

    let mut text = lines.join("\n");

    let body = issue.body.as_deref().map(str::trim).unwrap_or_default();
    if !body.is_empty() {
        text.push_str("\n\n");
        text.push_str(&escape_html(&truncate_chars(body, BODY_PREVIEW_CHARS)));
    }
    text
}
