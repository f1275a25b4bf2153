//! Find free calendar slots inside a window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use concierge_core::calendar::{CalendarService, SlotQuery};
use concierge_core::error::ToolError;
use concierge_core::tool::{Tool, ToolContext};
use std::sync::Arc;

const DEFAULT_DURATION_MINUTES: u32 = 30;

pub struct FindFreeSlotsTool {
    calendar: Arc<dyn CalendarService>,
}

impl FindFreeSlotsTool {
    pub fn new(calendar: Arc<dyn CalendarService>) -> Self {
        Self { calendar }
    }
}

#[async_trait]
impl Tool for FindFreeSlotsTool {
    fn name(&self) -> &str {
        "find_free_slots"
    }

    fn description(&self) -> &str {
        "Find free time slots on the user's calendar between two instants. Useful before proposing a meeting time."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "from": {
                    "type": "string",
                    "description": "Window start, RFC 3339"
                },
                "to": {
                    "type": "string",
                    "description": "Window end, RFC 3339"
                },
                "duration_minutes": {
                    "type": "integer",
                    "description": "Minimum slot length in minutes (default: 30)"
                }
            },
            "required": ["from", "to"]
        })
    }

    async fn invoke(
        &self,
        arguments: serde_json::Value,
        _ctx: &ToolContext,
    ) -> Result<String, ToolError> {
        let from = required_instant(&arguments, "from")?;
        let to = required_instant(&arguments, "to")?;
        let duration_minutes = arguments["duration_minutes"]
            .as_u64()
            .map(|n| n as u32)
            .unwrap_or(DEFAULT_DURATION_MINUTES);

        let query = SlotQuery {
            from,
            to,
            duration_minutes,
        };

        Ok(self.calendar.find_available_slots(query).await?)
    }
}

fn required_instant(arguments: &serde_json::Value, key: &str) -> Result<DateTime<Utc>, ToolError> {
    arguments[key]
        .as_str()
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{key}' argument")))?
        .parse::<DateTime<Utc>>()
        .map_err(|e| ToolError::InvalidArguments(format!("bad '{key}' timestamp: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::calendar::{MeetingRequest, UpcomingQuery};
    use concierge_core::error::CalendarError;
    use std::sync::Mutex;

    struct CapturingCalendar {
        seen: Mutex<Option<SlotQuery>>,
    }

    #[async_trait]
    impl CalendarService for CapturingCalendar {
        async fn schedule_meeting(&self, _r: MeetingRequest) -> Result<String, CalendarError> {
            unreachable!()
        }
        async fn list_upcoming_events(&self, _q: UpcomingQuery) -> Result<String, CalendarError> {
            unreachable!()
        }
        async fn find_available_slots(&self, q: SlotQuery) -> Result<String, CalendarError> {
            *self.seen.lock().unwrap() = Some(q);
            Ok("- free 2026-03-02 11:00 UTC to 13:00 UTC".into())
        }
        async fn cancel_meeting(&self, _id: &str) -> Result<String, CalendarError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn queries_with_parsed_window() {
        let calendar = Arc::new(CapturingCalendar {
            seen: Mutex::new(None),
        });
        let tool = FindFreeSlotsTool::new(calendar.clone());

        let out = tool
            .invoke(
                serde_json::json!({
                    "from": "2026-03-02T09:00:00Z",
                    "to": "2026-03-02T17:00:00Z",
                    "duration_minutes": 45,
                }),
                &ToolContext::default(),
            )
            .await
            .unwrap();

        assert!(out.contains("free"));
        let query = calendar.seen.lock().unwrap().clone().unwrap();
        assert_eq!(query.duration_minutes, 45);
        assert!(query.from < query.to);
    }

    #[tokio::test]
    async fn missing_window_is_an_argument_error() {
        let calendar = Arc::new(CapturingCalendar {
            seen: Mutex::new(None),
        });
        let tool = FindFreeSlotsTool::new(calendar);

        let err = tool
            .invoke(
                serde_json::json!({"from": "2026-03-02T09:00:00Z"}),
                &ToolContext::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
