//! Durable-storage collaborator implementations for Concierge.
//!
//! The real deployment sits on whatever document store the surrounding
//! service uses; these backends implement the same `TurnStore` boundary
//! for tests, local runs, and fire-and-forget persistence.

pub mod in_memory;
pub mod noop;

pub use in_memory::InMemoryStore;
pub use noop::NoopStore;
