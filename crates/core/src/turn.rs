//! The output of one full orchestration call.

use crate::event::ConversationEvent;
use serde::{Deserialize, Serialize};

/// Why the agent loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The model produced a plain-text response.
    TextProduced,

    /// The iteration cap was hit. Not an error: whatever partial event
    /// list exists, including unresolved tool calls, is still returned.
    IterationLimitReached,
}

/// The result of one turn: the full updated event list and the summed
/// cost of every model call made along the way. Immutable once returned;
/// the caller owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResult {
    pub events: Vec<ConversationEvent>,
    /// Sum of per-iteration costs in USD, rounded to 6 decimals.
    pub total_cost: f64,
    pub termination: Termination,
}

impl TurnResult {
    /// The last assistant text in the event list, if any.
    pub fn final_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|ev| match ev {
            ConversationEvent::AssistantMessage { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_text_picks_last_assistant_message() {
        let result = TurnResult {
            events: vec![
                ConversationEvent::system("sys"),
                ConversationEvent::user("hi", None),
                ConversationEvent::assistant("first"),
                ConversationEvent::assistant("second"),
            ],
            total_cost: 0.0,
            termination: Termination::TextProduced,
        };
        assert_eq!(result.final_text(), Some("second"));
    }

    #[test]
    fn final_text_none_when_cap_hit_without_text() {
        let result = TurnResult {
            events: vec![
                ConversationEvent::system("sys"),
                ConversationEvent::user("hi", None),
                ConversationEvent::tool_call("c1", "list_upcoming_events", "{}"),
                ConversationEvent::tool_result("c1", "No events"),
            ],
            total_cost: 0.001,
            termination: Termination::IterationLimitReached,
        };
        assert!(result.final_text().is_none());
    }
}
