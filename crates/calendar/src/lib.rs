//! REST calendar client for Concierge.
//!
//! Implements the `CalendarService` collaborator over a bearer-token
//! REST API. Credential refresh is handled internally: an access token
//! is cached and renewed through a refresh-token grant when it nears
//! expiry.

pub mod client;
mod slots;

pub use client::{CalendarCredentials, RestCalendar};
