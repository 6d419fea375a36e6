//! The polling loop: fetch the event list, replace the panel contents.
//!
//! Each cycle is stateless and independent; the only shared state is the
//! panel being replaced, the skip-if-busy guard, and the cycle counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::{FeedClient, FeedError};
use crate::events::{PollEvent, Reporter};
use crate::panel::EventPanel;

/// Periodically fetches the event list and fully replaces the panel.
pub struct Poller {
    client: FeedClient,
    panel: Arc<dyn EventPanel>,
    reporter: Arc<dyn Reporter>,
    max_events: usize,
    in_flight: AtomicBool,
    seq: AtomicU64,
}

impl Poller {
    pub fn new(
        client: FeedClient,
        panel: Arc<dyn EventPanel>,
        reporter: Arc<dyn Reporter>,
        max_events: usize,
    ) -> Self {
        Self {
            client,
            panel,
            reporter,
            max_events,
            in_flight: AtomicBool::new(false),
            seq: AtomicU64::new(0),
        }
    }

    /// Runs one fetch-then-render cycle.
    ///
    /// On success the panel is fully replaced with at most `max_events`
    /// entries, in server order, and the rendered count is returned. On any
    /// failure (non-2xx status, transport error, undecodable body) the panel
    /// is left untouched.
    ///
    /// # Errors
    /// Returns the [`FeedError`] for the failed cycle.
    pub async fn run_cycle(&self) -> Result<usize, FeedError> {
        let mut events = self.client.fetch_events().await?;
        events.truncate(self.max_events);
        self.panel.replace(&events);
        Ok(events.len())
    }

    /// Runs the polling loop: one cycle immediately, then one per `interval`
    /// until `cancel` trips.
    ///
    /// Cycles run as spawned tasks so a slow request never delays the timer.
    /// Overlap policy is skip-if-busy: a tick that finds a cycle still in
    /// flight reports [`PollEvent::CycleSkipped`] and starts nothing, so at
    /// most one request is ever outstanding and overlapping cycles cannot
    /// race on the panel. Failures are reported and never stop the loop.
    pub async fn run(self: Arc<Self>, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => self.clone().spawn_cycle(),
            }
        }
    }

    /// Starts one guarded cycle in the background, skipping if one is
    /// already in flight.
    fn spawn_cycle(self: Arc<Self>) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);

        if self.in_flight.swap(true, Ordering::AcqRel) {
            self.reporter.report(&PollEvent::CycleSkipped { seq });
            return;
        }

        tokio::spawn(async move {
            self.reporter.report(&PollEvent::CycleStarted { seq });
            match self.run_cycle().await {
                Ok(count) => {
                    self.reporter.report(&PollEvent::CycleCompleted { seq, count });
                }
                Err(error) => {
                    self.reporter.report(&PollEvent::CycleFailed { seq, error });
                }
            }
            self.in_flight.store(false, Ordering::Release);
        });
    }
}
