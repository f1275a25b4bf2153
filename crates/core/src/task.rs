//! Detached persistence tasks.
//!
//! Durability writes that follow a successful tool action must not slow
//! the model-facing path, and their failures must never surface to the
//! model or the caller. `spawn_logged` is that policy in one place:
//! spawn, log failures at `warn`, swallow them.

use std::future::Future;
use tracing::warn;

/// Spawn a fallible write without awaiting it on the caller's path.
///
/// Returns the `JoinHandle` so tests can await completion; production
/// call-sites drop it.
pub fn spawn_logged<F, E>(context: &'static str, fut: F) -> tokio::task::JoinHandle<()>
where
    F: Future<Output = std::result::Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            warn!(context, error = %e, "Detached write failed");
        }
    })
}
