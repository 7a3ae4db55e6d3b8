//! Element polling for pages that render their head with JavaScript

use std::time::{Duration, Instant};

use chromiumoxide::Page;

use crate::browser::BrowserError;

const INITIAL_POLL_INTERVAL: Duration = Duration::from_millis(100);
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poll for `selector` until it exists or `timeout` elapses.
///
/// The interval starts at 100ms and doubles up to 1s.
pub async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<(), BrowserError> {
    let start = Instant::now();
    let mut poll_interval = INITIAL_POLL_INTERVAL;

    loop {
        if page.find_element(selector).await.is_ok() {
            return Ok(());
        }

        if start.elapsed() >= timeout {
            return Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis(),
            });
        }

        tokio::time::sleep(poll_interval).await;
        poll_interval = next_interval(poll_interval);
    }
}

fn next_interval(current: Duration) -> Duration {
    (current * 2).min(MAX_POLL_INTERVAL)
}
