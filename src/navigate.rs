//! Page navigation for audits

use chromiumoxide::Page;
use std::time::Duration;
use tokio::time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::browser::{BrowserError, BrowserResult, create_blank_page};
use crate::manager::BrowserManager;
use crate::utils::constants::DEFAULT_NAVIGATION_TIMEOUT_MS;
use crate::utils::{validate_navigation_timeout, wait_for_element};

/// How to load the page before extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateOptions {
    /// Navigation timeout, defaults to 30s
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// CSS selector to wait for after load, for pages that inject meta tags client side
    #[serde(default)]
    pub wait_for_selector: Option<String>,
}

/// Accept only absolute http(s) URLs.
pub fn validate_url(raw: &str) -> BrowserResult<Url> {
    let url = Url::parse(raw).map_err(|e| BrowserError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(BrowserError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{scheme}', URL must start with http:// or https://"),
        }),
    }
}

/// Time left before `deadline`, zero once it has passed
fn remaining_until(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}

/// Open a fresh page on the shared browser and load `url` into it.
///
/// `goto`, the load wait and the selector wait share one timeout budget.
/// Other pages are left alone, so concurrent audits do not interfere. The
/// caller owns the returned page and should close it when done.
pub async fn open_page(
    manager: &BrowserManager,
    url: &str,
    options: &NavigateOptions,
) -> BrowserResult<Page> {
    let target = validate_url(url)?;
    let timeout = validate_navigation_timeout(options.timeout_ms, DEFAULT_NAVIGATION_TIMEOUT_MS)?;

    let browser_arc = manager.get_or_launch().await?;
    let page = {
        let browser_guard = browser_arc.lock().await;
        let wrapper = browser_guard.as_ref().ok_or_else(|| {
            BrowserError::PageCreationFailed("Browser not available".to_string())
        })?;
        create_blank_page(wrapper)
            .await
            .map_err(|e| BrowserError::PageCreationFailed(format!("{e:#}")))?
    };

    debug!("Navigating to {}", target);
    let deadline = Instant::now() + timeout;
    let timed_out = || BrowserError::Timeout {
        url: target.to_string(),
        timeout_ms: timeout.as_millis(),
    };

    tokio::time::timeout_at(deadline, page.goto(target.as_str()))
        .await
        .map_err(|_| timed_out())?
        .map_err(|e| BrowserError::NavigationFailed(format!("{}: {}", target, e)))?;

    tokio::time::timeout_at(deadline, page.wait_for_navigation())
        .await
        .map_err(|_| timed_out())?
        .map_err(|e| {
            BrowserError::NavigationFailed(format!("Failed to wait for page load completion: {}", e))
        })?;

    if let Some(selector) = &options.wait_for_selector {
        wait_for_element(&page, selector, remaining_until(deadline)).await?;
    }

    let final_url = page
        .url()
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| target.to_string());
    if final_url != target.as_str() {
        info!("Navigated to {} (redirected from {})", final_url, target);
    } else {
        info!("Navigated to {}", final_url);
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url("http://example.com").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = validate_url("file:///etc/hosts").expect_err("file scheme");
        assert!(matches!(err, BrowserError::InvalidUrl { .. }));
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn rejects_relative_urls() {
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("/index.html").is_err());
    }

    #[test]
    fn remaining_budget_shrinks_to_zero() {
        let now = Instant::now();
        assert!(remaining_until(now + Duration::from_secs(60)) > Duration::from_secs(59));
        assert_eq!(remaining_until(now), Duration::ZERO);
        assert_eq!(remaining_until(now - Duration::from_millis(10)), Duration::ZERO);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: NavigateOptions = serde_json::from_str("{}").expect("empty object");
        assert_eq!(options, NavigateOptions::default());
    }
}
