//! Browser lifecycle for audits
//!
//! Launches the chromiumoxide browser with a per-launch profile directory
//! and keeps its CDP handler task alive for as long as the browser is.

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::BrowserConfig;

/// Browser plus its event handler task
///
/// The handler MUST be aborted when the browser goes away, otherwise it keeps
/// polling a dead websocket. `Drop` takes care of that.
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    pub(crate) fn browser_mut(&mut self) -> &mut Browser {
        &mut self.browser
    }

    /// Remove the profile directory.
    ///
    /// Call only after `browser.wait()` returned, Chrome keeps file handles
    /// open until it exits. Blocking on purpose so it also works from `Drop`.
    pub fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Cleaning up temp directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        info!("Dropping BrowserWrapper - aborting handler task");
        self.handler.abort();

        if let Some(path) = self.user_data_dir.as_ref() {
            warn!(
                "BrowserWrapper dropped without explicit cleanup. \
                Temp directory will be orphaned: {}. \
                Call BrowserManager::shutdown() before dropping to ensure proper cleanup.",
                path.display()
            );
        }
    }
}

/// Launch the audit browser
///
/// Returns the browser, its handler task and the profile directory that must
/// be removed once the browser has shut down.
pub async fn launch_browser(config: &BrowserConfig) -> Result<(Browser, JoinHandle<()>, PathBuf)> {
    info!("Launching audit browser instance");

    let user_data_dir = next_profile_dir();

    let (browser, handler) =
        crate::browser_setup::launch_browser(config, Some(user_data_dir.clone())).await?;

    Ok((browser, handler, user_data_dir))
}

static LAUNCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Profile directory unique to this launch
///
/// Chrome locks its profile, and `shutdown()` deletes it, so two managers in
/// one process must never share a directory.
fn next_profile_dir() -> PathBuf {
    let launch = LAUNCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "social_meta_audit_{}_{}",
        std::process::id(),
        launch
    ))
}

/// Open an `about:blank` page to navigate from
pub async fn create_blank_page(wrapper: &BrowserWrapper) -> Result<Page> {
    let page = wrapper
        .browser()
        .new_page("about:blank")
        .await
        .context("Failed to create blank page")?;

    tracing::debug!("Created blank page");
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_launch_gets_its_own_profile_dir() {
        let first = next_profile_dir();
        let second = next_profile_dir();
        assert_ne!(first, second);
        assert!(first.starts_with(std::env::temp_dir()));

        let prefix = format!("social_meta_audit_{}_", std::process::id());
        let name = first.file_name().and_then(|name| name.to_str()).unwrap_or("");
        assert!(name.starts_with(&prefix));
    }
}
