//! Export transforms: a session plus its synced messages and parts rendered
//! as pretty-printed JSON or as a Markdown document.
//!
//! Pure data-in, text-out; delivery (file download, clipboard) is the
//! caller's concern.

use std::collections::HashMap;

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::constants::EXPORT_FILE_PREFIX;
use crate::error::ExportError;
use crate::models::{Message, MessagePart, Session};
use crate::store::WorkspaceData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json;charset=utf-8",
            ExportFormat::Markdown => "text/markdown;charset=utf-8",
        }
    }
}

/// Everything an export needs, borrowed from the workspace cache.
#[derive(Debug, Serialize)]
pub struct ExportPayload<'a> {
    pub directory: &'a str,
    pub session: &'a Session,
    pub messages: &'a [Message],
    /// Ordered content parts per message id.
    #[serde(rename = "partsByMessageID")]
    pub parts_by_message: HashMap<&'a str, &'a [MessagePart]>,
}

/// Assemble the export payload for a session.
///
/// Fails with [`ExportError::NotReady`] when the session's messages have not
/// been synced yet (absent or empty), so no empty/misleading file is ever
/// produced.
pub fn payload_for<'a>(
    workspace: &'a WorkspaceData,
    directory: &'a str,
    session: &'a Session,
) -> Result<ExportPayload<'a>, ExportError> {
    let messages = workspace
        .messages_for(&session.id)
        .filter(|messages| !messages.is_empty())
        .ok_or(ExportError::NotReady)?;

    let parts_by_message = messages
        .iter()
        .map(|m| (m.id.as_str(), workspace.parts_for(&m.id)))
        .collect();

    Ok(ExportPayload {
        directory,
        session,
        messages,
        parts_by_message,
    })
}

pub fn render(
    payload: &ExportPayload<'_>,
    format: ExportFormat,
    exported_at: DateTime<Local>,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(payload)?),
        ExportFormat::Markdown => Ok(render_markdown(payload, exported_at)),
    }
}

/// Concatenated text of all text and reasoning parts, trimmed. Other part
/// types carry no Markdown-exportable content.
pub fn parts_to_text(parts: &[MessagePart]) -> String {
    parts
        .iter()
        .filter_map(|p| p.export_text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn render_markdown(payload: &ExportPayload<'_>, exported_at: DateTime<Local>) -> String {
    let mut lines = vec![
        format!("# {}", payload.session.display_title()),
        String::new(),
        format!("> Project: {}", payload.directory),
        format!(
            "> Exported: {}",
            exported_at.to_rfc3339_opts(SecondsFormat::Secs, false)
        ),
        String::new(),
        "> Note: only text and reasoning content is included; use the JSON export for tool output and file diffs.".to_string(),
        String::new(),
    ];

    for message in payload.messages {
        lines.push(format!("## {}", message.role.label()));
        let text = parts_to_text(
            payload
                .parts_by_message
                .get(message.id.as_str())
                .copied()
                .unwrap_or(&[]),
        );
        if text.is_empty() {
            lines.push("_(no text content)_".to_string());
        } else {
            lines.push(text);
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Sanitize a title for use in a filename: path-unsafe characters collapse
/// to a single `-`, whitespace runs collapse to a single space.
pub fn safe_filename(name: &str) -> String {
    let mut replaced = String::with_capacity(name.len());
    let mut last_was_dash = false;
    for c in name.chars() {
        if matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            if !last_was_dash {
                replaced.push('-');
                last_was_dash = true;
            }
        } else {
            replaced.push(c);
            last_was_dash = false;
        }
    }
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `cadence-<sanitized title>-<yyyyMMdd_HHmm>.<ext>` — the timestamp keeps
/// repeated exports from colliding.
pub fn export_filename(title: &str, format: ExportFormat, now: DateTime<Local>) -> String {
    format!(
        "{}-{}-{}.{}",
        EXPORT_FILE_PREFIX,
        safe_filename(title),
        now.format("%Y%m%d_%H%M"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SessionTime};
    use crate::store::WorkspaceStore;
    use chrono::TimeZone;

    fn session(id: &str, title: &str) -> Session {
        Session {
            id: id.to_string(),
            title: title.to_string(),
            time: SessionTime::default(),
        }
    }

    fn message(id: &str, role: Role) -> Message {
        Message {
            id: id.to_string(),
            role,
        }
    }

    fn text_part(text: &str) -> MessagePart {
        MessagePart::Text {
            text: text.to_string(),
        }
    }

    fn loaded_workspace() -> (WorkspaceStore, Session) {
        let mut store = WorkspaceStore::new();
        let s = session("ses_1", "Debugging the parser");
        store.upsert_session("/proj", s.clone());
        store.set_messages(
            "/proj",
            "ses_1",
            vec![message("msg_1", Role::User), message("msg_2", Role::Assistant)],
        );
        store.set_parts("/proj", "msg_1", vec![text_part("Why does this fail?")]);
        store.set_parts(
            "/proj",
            "msg_2",
            vec![
                MessagePart::Reasoning {
                    text: "Considering the grammar. ".to_string(),
                },
                MessagePart::Tool {
                    name: "read".to_string(),
                    output: "should not appear".to_string(),
                },
                text_part("The rule is left-recursive."),
            ],
        );
        (store, s)
    }

    fn stamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 0).unwrap()
    }

    #[test]
    fn test_payload_requires_loaded_messages() {
        let mut store = WorkspaceStore::new();
        let s = session("ses_1", "Empty");
        store.upsert_session("/proj", s.clone());

        // Never synced
        let err = payload_for(store.workspace("/proj").unwrap(), "/proj", &s).unwrap_err();
        assert!(matches!(err, ExportError::NotReady));

        // Synced but empty is just as unexportable
        store.set_messages("/proj", "ses_1", Vec::new());
        let err = payload_for(store.workspace("/proj").unwrap(), "/proj", &s).unwrap_err();
        assert!(matches!(err, ExportError::NotReady));
    }

    #[test]
    fn test_json_export_shape() {
        let (store, s) = loaded_workspace();
        let payload = payload_for(store.workspace("/proj").unwrap(), "/proj", &s).unwrap();

        let json = render(&payload, ExportFormat::Json, stamp()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["directory"], "/proj");
        assert_eq!(value["session"]["title"], "Debugging the parser");
        assert_eq!(value["messages"].as_array().unwrap().len(), 2);
        assert_eq!(
            value["partsByMessageID"]["msg_1"][0]["text"],
            "Why does this fail?"
        );
        // Tool parts are present in the JSON export
        assert_eq!(value["partsByMessageID"]["msg_2"][1]["type"], "tool");
    }

    #[test]
    fn test_markdown_export_layout() {
        let (store, s) = loaded_workspace();
        let payload = payload_for(store.workspace("/proj").unwrap(), "/proj", &s).unwrap();

        let md = render(&payload, ExportFormat::Markdown, stamp()).unwrap();

        assert!(md.starts_with("# Debugging the parser\n"));
        assert!(md.contains("> Project: /proj"));
        assert!(md.contains("> Exported: 2025-03-14T09:26:00"));
        assert!(md.contains("## User\nWhy does this fail?"));
        // Reasoning text concatenates with the text part; tool output is omitted
        assert!(md.contains("## Assistant\nConsidering the grammar. The rule is left-recursive."));
        assert!(!md.contains("should not appear"));
    }

    #[test]
    fn test_markdown_placeholder_for_textless_message() {
        let mut store = WorkspaceStore::new();
        let s = session("ses_1", "");
        store.upsert_session("/proj", s.clone());
        store.set_messages("/proj", "ses_1", vec![message("msg_1", Role::Assistant)]);
        store.set_parts(
            "/proj",
            "msg_1",
            vec![MessagePart::Tool {
                name: "bash".to_string(),
                output: "…".to_string(),
            }],
        );

        let payload = payload_for(store.workspace("/proj").unwrap(), "/proj", &s).unwrap();
        let md = render(&payload, ExportFormat::Markdown, stamp()).unwrap();

        assert!(md.starts_with("# Untitled conversation\n"));
        assert!(md.contains("## Assistant\n_(no text content)_"));
    }

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("fix: parser/lexer *bug*?"), "fix- parser-lexer -bug-");
        assert_eq!(safe_filename("a//b"), "a-b");
        assert_eq!(safe_filename("  spaced   out  "), "spaced out");
    }

    #[test]
    fn test_export_filename() {
        let name = export_filename("Debugging: the parser", ExportFormat::Markdown, stamp());
        assert_eq!(name, "cadence-Debugging- the parser-20250314_0926.md");

        let name = export_filename("plain", ExportFormat::Json, stamp());
        assert_eq!(name, "cadence-plain-20250314_0926.json");
    }
}
