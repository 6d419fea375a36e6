//! Poll lifecycle events and the diagnostic reporting seam.
//!
//! Events are serializable for future JSON output mode support.

use serde::{Deserialize, Serialize};

use crate::client::{FeedError, FeedErrorKind};

/// Events emitted by the poller during execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PollEvent {
    /// A cycle has started its request.
    CycleStarted { seq: u64 },

    /// A cycle fetched and rendered `count` events.
    CycleCompleted { seq: u64, count: usize },

    /// A tick found the previous cycle still in flight and started nothing.
    CycleSkipped { seq: u64 },

    /// A cycle failed; the displayed list was left untouched.
    CycleFailed { seq: u64, error: FeedError },
}

/// Operator-facing diagnostic sink, injected into the poller.
///
/// Decouples the polling logic from any specific output: the CLI reports to
/// stderr, tests collect events, library users bring their own.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &PollEvent);
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &PollEvent) {}
}

/// Default reporter writing through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &PollEvent) {
        match event {
            PollEvent::CycleStarted { seq } => {
                tracing::debug!(seq, "poll cycle started");
            }
            PollEvent::CycleCompleted { seq, count } => {
                tracing::debug!(seq, count, "poll cycle completed");
            }
            PollEvent::CycleSkipped { seq } => {
                tracing::debug!(seq, "poll cycle skipped, previous still in flight");
            }
            PollEvent::CycleFailed { seq, error } => {
                tracing::warn!(seq, kind = %error.kind, "{}", failure_line(error));
            }
        }
    }
}

/// Formats a failure for operators: one fixed shape for bad statuses, one
/// for everything else.
pub fn failure_line(error: &FeedError) -> String {
    match error.kind {
        FeedErrorKind::HttpStatus => format!("Error fetching events: {}", error.message),
        _ => format!("Failed to fetch events: {error}"),
    }
}
