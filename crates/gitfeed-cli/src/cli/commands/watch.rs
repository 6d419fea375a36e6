//! Watch command: the long-running poll-and-render loop.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use gitfeed_core::config::Config;
use gitfeed_core::{EventPanel, FeedClient, PollEvent, Poller, Reporter, failure_line};
use tokio_util::sync::CancellationToken;

/// Panel that re-renders the whole list to stdout on every replacement.
struct ConsolePanel;

impl EventPanel for ConsolePanel {
    fn replace(&self, events: &[String]) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "── {} events, updated {} ──",
            events.len(),
            Local::now().format("%H:%M:%S")
        );
        for event in events {
            let _ = writeln!(out, "  {event}");
        }
    }
}

/// Reporter that mirrors failures to stderr and forwards everything to
/// tracing for GITFEED_LOG consumers.
struct StderrReporter {
    inner: gitfeed_core::TracingReporter,
}

impl Reporter for StderrReporter {
    fn report(&self, event: &PollEvent) {
        if let PollEvent::CycleFailed { error, .. } = event {
            eprintln!("{}", failure_line(error));
        }
        self.inner.report(event);
    }
}

/// Runs the polling loop until Ctrl-C.
///
/// # Errors
/// Returns an error only for setup failures; poll failures are reported
/// and the loop keeps its cadence.
pub async fn run(config: &Config) -> Result<()> {
    let client = FeedClient::from_config(config)?;
    eprintln!(
        "gitfeed started (feed: {}, poll={}s, max {} events)",
        client.base_url(),
        config.poll_interval().as_secs(),
        config.max_events,
    );

    let poller = Arc::new(Poller::new(
        client,
        Arc::new(ConsolePanel),
        Arc::new(StderrReporter {
            inner: gitfeed_core::TracingReporter,
        }),
        config.max_events,
    ));

    let cancel = CancellationToken::new();
    let loop_handle = tokio::spawn(poller.run(config.poll_interval(), cancel.clone()));

    tokio::signal::ctrl_c()
        .await
        .context("listen for ctrl-c")?;
    eprintln!("Shutting down.");
    cancel.cancel();
    loop_handle.await.context("join poll loop")?;

    Ok(())
}
