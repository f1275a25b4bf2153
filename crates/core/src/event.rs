//! Conversation events — the ordered context window.
//!
//! A turn's event list is the literal context submitted to the reasoning
//! model on every iteration, so ordering is significant and preserved
//! end to end. The invariant maintained by the agent crate: exactly one
//! `SystemPrompt` event exists and it is always first.

use serde::{Deserialize, Serialize};

/// Opaque reference to a previously uploaded file.
///
/// The runtime never inspects file bytes; the model client resolves the
/// identifier on its side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef(pub String);

impl FileRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque user/session identity, used to key durable records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a turn's ordered event list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// Instructions for the model. Replaced in place (never appended)
    /// every loop iteration so the embedded date/time stays current.
    SystemPrompt { text: String },

    /// What the user said, optionally carrying an uploaded file.
    UserMessage {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FileRef>,
    },

    /// Final (or intermediate) text produced by the model.
    AssistantMessage { text: String },

    /// The model asked for a tool to run. `arguments` is the raw JSON
    /// string as emitted by the model.
    ToolCall {
        call_id: String,
        name: String,
        arguments: String,
    },

    /// What the tool returned, paired to its call by `call_id`.
    ToolResult { call_id: String, output: String },

    /// Free-text summary of the model's deliberation for one iteration.
    /// Kept for observability; never drives control flow.
    ReasoningTrace { summary: String },
}

impl ConversationEvent {
    pub fn system(text: impl Into<String>) -> Self {
        Self::SystemPrompt { text: text.into() }
    }

    pub fn user(text: impl Into<String>, file: Option<FileRef>) -> Self {
        Self::UserMessage {
            text: text.into(),
            file,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::AssistantMessage { text: text.into() }
    }

    pub fn tool_call(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self::ToolCall {
            call_id: call_id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    pub fn tool_result(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self::ToolResult {
            call_id: call_id.into(),
            output: output.into(),
        }
    }

    pub fn reasoning(summary: impl Into<String>) -> Self {
        Self::ReasoningTrace {
            summary: summary.into(),
        }
    }

    /// Whether this event is the system prompt slot.
    pub fn is_system_prompt(&self) -> bool {
        matches!(self, Self::SystemPrompt { .. })
    }
}
