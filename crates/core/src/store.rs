//! TurnStore trait — the durable-storage collaborator.
//!
//! Append-only persistence of messages, tool-call records, reasoning
//! traces, and meeting/CSAT records, each keyed by an opaque user
//! identity. The CRUD machinery behind it is out of core scope.

use crate::error::StoreError;
use crate::event::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted conversation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    /// "user", "assistant" or "system".
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: role.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A persisted tool invocation with its result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    pub call_id: String,
    pub name: String,
    pub arguments: String,
    pub output: String,
    pub created_at: DateTime<Utc>,
}

impl ToolRecord {
    pub fn new(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            call_id: call_id.into(),
            name: name.into(),
            arguments: arguments.into(),
            output: output.into(),
            created_at: Utc::now(),
        }
    }
}

/// A persisted reasoning summary with the cost of the model call that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningRecord {
    pub id: String,
    pub summary: String,
    /// Cost of the model call this summary came from, in USD. The same
    /// value the loop accumulated into the turn total.
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

impl ReasoningRecord {
    pub fn new(summary: impl Into<String>, cost: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            summary: summary.into(),
            cost,
            created_at: Utc::now(),
        }
    }
}

/// What happened to a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingAction {
    Scheduled,
    Cancelled,
}

/// A durable side-record of a calendar write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub id: String,
    pub action: MeetingAction,
    /// The formatted confirmation the user saw.
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

impl MeetingRecord {
    pub fn new(action: MeetingAction, detail: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action,
            detail: detail.into(),
            created_at: Utc::now(),
        }
    }
}

/// A customer-satisfaction entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsatRecord {
    pub id: String,
    /// 1–5 inclusive. Validated by the recording tool before this struct
    /// is ever built.
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CsatRecord {
    pub fn new(score: u8, feedback: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            score,
            feedback,
            created_at: Utc::now(),
        }
    }
}

/// One position in a client portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub value: f64,
}

/// A point-in-time view of a client portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub holdings: Vec<Holding>,
    pub total_value: f64,
    pub currency: String,
    pub as_of: DateTime<Utc>,
}

/// The durable-storage collaborator.
#[async_trait]
pub trait TurnStore: Send + Sync {
    /// A human-readable name for this backend (e.g., "in_memory").
    fn name(&self) -> &str;

    async fn append_message(
        &self,
        user: &UserId,
        message: StoredMessage,
    ) -> std::result::Result<(), StoreError>;

    async fn append_tool_record(
        &self,
        user: &UserId,
        record: ToolRecord,
    ) -> std::result::Result<(), StoreError>;

    async fn append_reasoning_trace(
        &self,
        user: &UserId,
        record: ReasoningRecord,
    ) -> std::result::Result<(), StoreError>;

    async fn append_meeting_record(
        &self,
        user: &UserId,
        record: MeetingRecord,
    ) -> std::result::Result<(), StoreError>;

    async fn append_csat(
        &self,
        user: &UserId,
        record: CsatRecord,
    ) -> std::result::Result<(), StoreError>;

    async fn load_portfolio(
        &self,
        user: &UserId,
    ) -> std::result::Result<Option<PortfolioSnapshot>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_message_gets_id_and_timestamp() {
        let msg = StoredMessage::new("user", "hello");
        assert!(!msg.id.is_empty());
        assert_eq!(msg.role, "user");
    }

    #[test]
    fn csat_record_serialization_omits_empty_feedback() {
        let rec = CsatRecord::new(5, None);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("feedback"));
    }

    #[test]
    fn meeting_action_serializes_snake_case() {
        let rec = MeetingRecord::new(MeetingAction::Cancelled, "Cancelled event evt_1");
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("cancelled"));
    }
}
