//! Cancel a calendar event.

use async_trait::async_trait;
use concierge_core::calendar::CalendarService;
use concierge_core::error::ToolError;
use concierge_core::store::{MeetingAction, MeetingRecord, TurnStore};
use concierge_core::task::spawn_logged;
use concierge_core::tool::{Tool, ToolContext};
use std::sync::Arc;

pub struct CancelMeetingTool {
    calendar: Arc<dyn CalendarService>,
    store: Arc<dyn TurnStore>,
}

impl CancelMeetingTool {
    pub fn new(calendar: Arc<dyn CalendarService>, store: Arc<dyn TurnStore>) -> Self {
        Self { calendar, store }
    }
}

#[async_trait]
impl Tool for CancelMeetingTool {
    fn name(&self) -> &str {
        "cancel_meeting"
    }

    fn description(&self) -> &str {
        "Cancel a calendar event by its identifier (as returned by list_upcoming_events or schedule_meeting)."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "event_id": {
                    "type": "string",
                    "description": "The identifier of the event to cancel"
                }
            },
            "required": ["event_id"]
        })
    }

    async fn invoke(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<String, ToolError> {
        let event_id = arguments["event_id"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'event_id' argument".into()))?;

        let confirmation = self.calendar.cancel_meeting(event_id).await?;

        if let Some(user) = ctx.user_id.clone() {
            let store = self.store.clone();
            let record = MeetingRecord::new(MeetingAction::Cancelled, confirmation.clone());
            spawn_logged("meeting_record", async move {
                store.append_meeting_record(&user, record).await
            });
        }

        Ok(confirmation)
    }
}
