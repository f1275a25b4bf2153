//! Schedule a meeting through the calendar collaborator.
//!
//! The calendar write is the user-visible action; the durable
//! `MeetingRecord` is a side-record written fire-and-forget when a user
//! identity is available.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use concierge_core::calendar::{CalendarService, MeetingRequest};
use concierge_core::error::ToolError;
use concierge_core::store::{MeetingAction, MeetingRecord, TurnStore};
use concierge_core::task::spawn_logged;
use concierge_core::tool::{Tool, ToolContext};
use std::sync::Arc;

pub struct ScheduleMeetingTool {
    calendar: Arc<dyn CalendarService>,
    store: Arc<dyn TurnStore>,
}

impl ScheduleMeetingTool {
    pub fn new(calendar: Arc<dyn CalendarService>, store: Arc<dyn TurnStore>) -> Self {
        Self { calendar, store }
    }
}

#[async_trait]
impl Tool for ScheduleMeetingTool {
    fn name(&self) -> &str {
        "schedule_meeting"
    }

    fn description(&self) -> &str {
        "Schedule a meeting on the user's calendar. Takes a title, a start time (RFC 3339), and optionally an end time, attendee emails, and a description."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Meeting title"
                },
                "start": {
                    "type": "string",
                    "description": "Start time, RFC 3339 (e.g. 2026-03-02T10:00:00Z)"
                },
                "end": {
                    "type": "string",
                    "description": "End time, RFC 3339. Defaults to one hour after start"
                },
                "attendees": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Attendee email addresses"
                },
                "description": {
                    "type": "string",
                    "description": "Free-text agenda"
                }
            },
            "required": ["title", "start"]
        })
    }

    async fn invoke(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<String, ToolError> {
        let title = arguments["title"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'title' argument".into()))?
            .to_string();

        let start = parse_instant(&arguments, "start")?
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'start' argument".into()))?;
        let end = parse_instant(&arguments, "end")?.unwrap_or(start + Duration::hours(1));

        let attendees = arguments["attendees"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        let request = MeetingRequest {
            title,
            start,
            end,
            attendees,
            description: arguments["description"].as_str().map(String::from),
        };

        let confirmation = self.calendar.schedule_meeting(request).await?;

        if let Some(user) = ctx.user_id.clone() {
            let store = self.store.clone();
            let record = MeetingRecord::new(MeetingAction::Scheduled, confirmation.clone());
            spawn_logged("meeting_record", async move {
                store.append_meeting_record(&user, record).await
            });
        }

        Ok(confirmation)
    }
}

/// Read an optional RFC 3339 field; a present-but-unparseable value is
/// an argument error, not a missing value.
fn parse_instant(
    arguments: &serde_json::Value,
    key: &str,
) -> Result<Option<DateTime<Utc>>, ToolError> {
    match arguments[key].as_str() {
        None => Ok(None),
        Some(raw) => raw
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(|e| ToolError::InvalidArguments(format!("bad '{key}' timestamp: {e}"))),
    }
}
