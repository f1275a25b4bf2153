//! # Concierge Core
//!
//! Domain types, collaborator traits, and error definitions for the
//! Concierge assistant runtime. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (reasoning model, calendar, durable store)
//! is defined as a trait here. Implementations live in their respective
//! crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod calendar;
pub mod error;
pub mod event;
pub mod model;
pub mod store;
pub mod task;
pub mod tool;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use calendar::{CalendarService, MeetingRequest, SlotQuery, UpcomingQuery};
pub use error::{CalendarError, Error, ModelError, Result, StoreError, ToolError};
pub use event::{ConversationEvent, FileRef, UserId};
pub use model::{ModelClient, ModelResponse, OutputItem, ToolDefinition, UsageRecord};
pub use store::{
    CsatRecord, Holding, MeetingAction, MeetingRecord, PortfolioSnapshot, ReasoningRecord,
    StoredMessage, ToolRecord, TurnStore,
};
pub use task::spawn_logged;
pub use tool::{Tool, ToolContext, ToolRegistry};
pub use turn::{Termination, TurnResult};
