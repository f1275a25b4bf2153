//! CalendarService trait — the abstraction over the calendar collaborator.
//!
//! Each operation returns a formatted text result ready to feed back to
//! the model. Credential refresh is the implementation's own business.

use crate::error::CalendarError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for scheduling a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameters for listing upcoming events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingQuery {
    /// Events starting at or after this instant.
    pub from: DateTime<Utc>,
    /// Maximum number of events to return.
    pub max_results: usize,
}

/// Parameters for finding free slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// Minimum slot length worth reporting.
    pub duration_minutes: u32,
}

/// The calendar collaborator.
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Create an event. Returns a confirmation line including the new
    /// event's identifier.
    async fn schedule_meeting(
        &self,
        request: MeetingRequest,
    ) -> std::result::Result<String, CalendarError>;

    /// List upcoming events as human-readable lines.
    async fn list_upcoming_events(
        &self,
        query: UpcomingQuery,
    ) -> std::result::Result<String, CalendarError>;

    /// Report free slots inside a window.
    async fn find_available_slots(
        &self,
        query: SlotQuery,
    ) -> std::result::Result<String, CalendarError>;

    /// Cancel an event by identifier.
    async fn cancel_meeting(&self, event_id: &str) -> std::result::Result<String, CalendarError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_request_serialization() {
        let req = MeetingRequest {
            title: "Quarterly review".into(),
            start: "2026-03-02T10:00:00Z".parse().unwrap(),
            end: "2026-03-02T11:00:00Z".parse().unwrap(),
            attendees: vec!["ana@example.com".into()],
            description: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("Quarterly review"));
        assert!(!json.contains("description"));
    }

    #[test]
    fn slot_query_roundtrip() {
        let q = SlotQuery {
            from: "2026-03-02T08:00:00Z".parse().unwrap(),
            to: "2026-03-02T18:00:00Z".parse().unwrap(),
            duration_minutes: 30,
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: SlotQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back.duration_minutes, 30);
    }
}
