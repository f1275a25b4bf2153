//! Conversation reconstruction.
//!
//! Builds the exact event list for a new turn from prior history and the
//! incoming user message. The contract is symmetric: the caller never
//! includes the current message in `prior`, and this function always
//! appends it — with or without a file attachment. Stale system prompts
//! in the history are stripped; the freshly rendered one goes first.

use concierge_core::event::{ConversationEvent, FileRef};

/// Produce the ordered event list for a new turn.
///
/// Pure: the system prompt is rendered by the caller so this function
/// never touches a clock.
pub fn reconstruct(
    prior: Vec<ConversationEvent>,
    rendered_prompt: String,
    user_input: &str,
    file: Option<FileRef>,
) -> Vec<ConversationEvent> {
    let mut events = Vec::with_capacity(prior.len() + 2);
    events.push(ConversationEvent::system(rendered_prompt));
    events.extend(prior.into_iter().filter(|ev| !ev.is_system_prompt()));
    events.push(ConversationEvent::user(user_input, file));
    events
}
