//! The Concierge orchestration loop.
//!
//! One turn works like this:
//!
//! 1. **Reconstruct** the event list from prior history + the new user
//!    message (with optional file attachment)
//! 2. **Render** the system prompt with the current date/time
//! 3. **Submit** the full event list plus the tool schema to the model
//! 4. **If tool calls**: dispatch each one in order, append results, loop
//! 5. **If text**: finish with `Termination::TextProduced`
//!
//! The loop runs at most `max_iterations` model round-trips; hitting the
//! cap is a defined terminal state, not an error.

pub mod loop_runner;
pub mod prompt;
pub mod reconstruct;

pub use loop_runner::AgentLoop;
pub use prompt::{DATETIME_PLACEHOLDER, DEFAULT_SYSTEM_TEMPLATE, render};
pub use reconstruct::reconstruct;
