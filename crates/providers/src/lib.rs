//! Reasoning-model client implementations for Concierge.
//!
//! One backend ships today: the OpenAI Responses API. Anything speaking
//! the same wire format works through the same client.

pub mod responses;

pub use responses::OpenAiResponsesClient;
