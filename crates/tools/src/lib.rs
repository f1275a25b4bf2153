//! Built-in tool implementations for Concierge.
//!
//! Tools let the model act on the user's behalf: manage the calendar,
//! look up portfolio data, and record satisfaction feedback. Calendar
//! and store handles are injected; each handler calls exactly one
//! collaborator operation and formats a result string.

pub mod cancel_meeting;
pub mod csat;
pub mod find_slots;
pub mod list_events;
pub mod portfolio;
pub mod schedule_meeting;

use concierge_core::calendar::CalendarService;
use concierge_core::store::TurnStore;
use concierge_core::tool::ToolRegistry;
use std::sync::Arc;

/// Create a registry with all built-in tools.
pub fn default_registry(
    calendar: Arc<dyn CalendarService>,
    store: Arc<dyn TurnStore>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(schedule_meeting::ScheduleMeetingTool::new(
        calendar.clone(),
        store.clone(),
    )));
    registry.register(Box::new(list_events::ListUpcomingEventsTool::new(
        calendar.clone(),
    )));
    registry.register(Box::new(find_slots::FindFreeSlotsTool::new(calendar.clone())));
    registry.register(Box::new(cancel_meeting::CancelMeetingTool::new(
        calendar,
        store.clone(),
    )));
    registry.register(Box::new(portfolio::PortfolioLookupTool::new(store.clone())));
    registry.register(Box::new(csat::RecordCsatTool::new(store)));
    registry
}
