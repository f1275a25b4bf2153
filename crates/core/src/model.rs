//! ModelClient trait — the abstraction over the reasoning-model API.
//!
//! The agent loop calls `submit()` without knowing which backend is in
//! play. One call = one network round-trip = one `UsageRecord`.

use crate::error::ModelError;
use crate::event::ConversationEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage reported for a single model call.
///
/// Consumed immediately by the cost model; only the derived cost is
/// retained beyond the iteration that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A tool definition sent to the model so it knows what it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// One item in a model response.
///
/// A closed sum: adding a new model output kind is a compile-time-visible
/// decision. Kinds the decoder does not understand land in `Unrecognized`
/// and are passed through — they neither stop nor corrupt the loop.
#[derive(Debug, Clone)]
pub enum OutputItem {
    /// Plain assistant text.
    Text { content: String },

    /// A request to invoke a named tool. `arguments` is the raw JSON
    /// string exactly as the model emitted it.
    ToolCall {
        call_id: String,
        name: String,
        arguments: String,
    },

    /// A summary of the model's internal deliberation.
    Reasoning { summary: String },

    /// Anything the decoder did not recognize, kept verbatim.
    Unrecognized(serde_json::Value),
}

/// A complete response from one model call.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Output items in the order the model emitted them.
    pub output: Vec<OutputItem>,

    /// Token usage for this call.
    pub usage: UsageRecord,
}

/// The reasoning-model collaborator.
///
/// Timeouts are this collaborator's responsibility, not the loop's.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// A human-readable name for this client (e.g., "openai-responses").
    fn name(&self) -> &str;

    /// Submit the full ordered event list plus the tool schema, blocking
    /// until the model responds.
    async fn submit(
        &self,
        events: &[ConversationEvent],
        tools: &[ToolDefinition],
    ) -> std::result::Result<ModelResponse, ModelError>;
}
