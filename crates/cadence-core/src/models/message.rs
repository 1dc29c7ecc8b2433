use serde::{Deserialize, Serialize};

/// Author role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Section heading used by the Markdown export.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One message in a session, as supplied by the sync client. Message content
/// lives in the ordered part list keyed by message id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
}

/// A single content part of a message.
///
/// Only `text` and `reasoning` parts carry content the Markdown export
/// includes; tool output and file diffs are available via the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePart {
    Text {
        text: String,
    },
    Reasoning {
        text: String,
    },
    Tool {
        name: String,
        #[serde(default)]
        output: String,
    },
    File {
        path: String,
    },
}

impl MessagePart {
    /// The part's contribution to the Markdown export, if any.
    pub fn export_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } | MessagePart::Reasoning { text } => Some(text),
            _ => None,
        }
    }
}
