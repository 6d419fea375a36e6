//! One-shot fetch command.

use anyhow::{Result, anyhow};
use gitfeed_core::config::Config;
use gitfeed_core::{FeedClient, failure_line};

/// Fetches the event list once and prints it, newest first.
///
/// # Errors
/// Returns an error if the request fails or the body is malformed.
pub async fn run(config: &Config) -> Result<()> {
    let client = FeedClient::from_config(config)?;

    let mut events = client
        .fetch_events()
        .await
        .map_err(|err| anyhow!(failure_line(&err)))?;
    events.truncate(config.max_events);

    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }

    for event in &events {
        println!("{event}");
    }
    Ok(())
}
