//! Core gitfeed library: config, feed client, poller, panel, events.
//!
//! gitfeed watches an event feed server (a GitHub-webhook dashboard that
//! exposes pre-formatted event strings at `GET /api/events`) and keeps a
//! display panel in sync with it: one fetch per cycle, full replacement of
//! the displayed list, failures reported and skipped.

pub mod client;
pub mod config;
pub mod events;
pub mod panel;
pub mod poller;

pub use client::{FeedClient, FeedError, FeedErrorKind};
pub use config::Config;
pub use events::{NullReporter, PollEvent, Reporter, TracingReporter, failure_line};
pub use panel::{EventPanel, MemoryPanel};
pub use poller::Poller;
