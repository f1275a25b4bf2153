//! List upcoming calendar events.

use async_trait::async_trait;
use chrono::Utc;
use concierge_core::calendar::{CalendarService, UpcomingQuery};
use concierge_core::error::ToolError;
use concierge_core::tool::{Tool, ToolContext};
use std::sync::Arc;

const DEFAULT_MAX_RESULTS: usize = 10;

pub struct ListUpcomingEventsTool {
    calendar: Arc<dyn CalendarService>,
}

impl ListUpcomingEventsTool {
    pub fn new(calendar: Arc<dyn CalendarService>) -> Self {
        Self { calendar }
    }
}

#[async_trait]
impl Tool for ListUpcomingEventsTool {
    fn name(&self) -> &str {
        "list_upcoming_events"
    }

    fn description(&self) -> &str {
        "List the user's upcoming calendar events, soonest first."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of events to return (default: 10)"
                }
            }
        })
    }

    async fn invoke(
        &self,
        arguments: serde_json::Value,
        _ctx: &ToolContext,
    ) -> Result<String, ToolError> {
        let max_results = arguments["max_results"]
            .as_u64()
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let query = UpcomingQuery {
            from: Utc::now(),
            max_results,
        };

        Ok(self.calendar.list_upcoming_events(query).await?)
    }
}
