//! Timeout validation for navigation

use std::time::Duration;

use crate::browser::BrowserError;

/// Upper bound for page navigation (5 minutes)
pub const MAX_NAVIGATION_TIMEOUT_MS: u64 = 300_000;

/// Resolve and validate a navigation timeout.
///
/// `timeout_ms` falls back to `default_ms`. Zero and anything above
/// `MAX_NAVIGATION_TIMEOUT_MS` are rejected.
pub fn validate_navigation_timeout(
    timeout_ms: Option<u64>,
    default_ms: u64,
) -> Result<Duration, BrowserError> {
    let ms = timeout_ms.unwrap_or(default_ms);

    if ms == 0 {
        return Err(BrowserError::InvalidTimeout(
            "Timeout must be greater than 0ms".to_string(),
        ));
    }

    if ms > MAX_NAVIGATION_TIMEOUT_MS {
        return Err(BrowserError::InvalidTimeout(format!(
            "Timeout cannot exceed {}ms ({} minutes). Received: {}ms ({:.1} minutes)",
            MAX_NAVIGATION_TIMEOUT_MS,
            MAX_NAVIGATION_TIMEOUT_MS / 60_000,
            ms,
            ms as f64 / 60_000.0
        )));
    }

    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_default_when_unset() {
        let timeout = validate_navigation_timeout(None, 30_000).expect("valid default");
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_value_wins() {
        let timeout = validate_navigation_timeout(Some(45_000), 30_000).expect("valid value");
        assert_eq!(timeout, Duration::from_millis(45_000));
    }

    #[test]
    fn maximum_is_inclusive() {
        assert!(validate_navigation_timeout(Some(MAX_NAVIGATION_TIMEOUT_MS), 1).is_ok());
        assert!(matches!(
            validate_navigation_timeout(Some(MAX_NAVIGATION_TIMEOUT_MS + 1), 1),
            Err(BrowserError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn zero_is_rejected() {
        assert!(validate_navigation_timeout(Some(0), 30_000).is_err());
    }
}
