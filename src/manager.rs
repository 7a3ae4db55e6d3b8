//! Shared browser instance for audits
//!
//! One Chrome process serves every audit in the process. Audits each open
//! their own page, so only the launch/health-check path is serialized.
//!
//! The lock is a `tokio::sync::Mutex`: browser calls are async and the guard
//! is held across `.await`.

use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::BrowserConfig;
use crate::browser::{BrowserError, BrowserResult, BrowserWrapper, launch_browser};

static GLOBAL_MANAGER: OnceLock<Arc<BrowserManager>> = OnceLock::new();

/// Lazily launched, health-checked browser
///
/// - first `get_or_launch()` starts Chrome (a few seconds)
/// - later calls check liveness with a `version()` CDP round trip
/// - a crashed browser is torn down and relaunched transparently
pub struct BrowserManager {
    config: BrowserConfig,
    browser: Arc<Mutex<Option<BrowserWrapper>>>,
}

impl BrowserManager {
    /// Process-wide manager configured from `config.yaml` (or defaults)
    #[must_use]
    pub fn global() -> Arc<BrowserManager> {
        GLOBAL_MANAGER
            .get_or_init(|| {
                let config = crate::load_yaml_config(crate::DEFAULT_CONFIG_FILE).unwrap_or_else(|e| {
                    warn!("Ignoring unreadable config: {e:#}");
                    crate::Config::default()
                });
                Arc::new(BrowserManager::with_config(config.browser))
            })
            .clone()
    }

    /// Standalone manager with its own browser. Call `shutdown()` when done.
    pub fn with_config(config: BrowserConfig) -> Self {
        Self {
            config,
            browser: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Return the shared browser, launching or relaunching it as needed.
    ///
    /// The caller locks the returned mutex to reach the `BrowserWrapper`.
    pub async fn get_or_launch(&self) -> BrowserResult<Arc<Mutex<Option<BrowserWrapper>>>> {
        let mut guard = self.browser.lock().await;

        if let Some(wrapper) = guard.as_ref() {
            match wrapper.browser().version().await {
                Ok(_) => {
                    debug!("Browser health check passed, reusing existing browser");
                    drop(guard);
                    return Ok(self.browser.clone());
                }
                Err(e) => {
                    warn!("Browser health check failed: {}. Triggering recovery...", e);

                    if let Some(mut crashed) = guard.take() {
                        // process may already be gone
                        let _ = crashed.browser_mut().close().await;
                        let _ = crashed.browser_mut().wait().await;
                        crashed.cleanup_temp_dir();
                    }
                }
            }
        }

        info!("Launching browser (first time or after recovery)");
        let (browser, handler, user_data_dir) = launch_browser(&self.config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(format!("{e:#}")))?;
        *guard = Some(BrowserWrapper::new(browser, handler, user_data_dir));
        drop(guard);

        Ok(self.browser.clone())
    }

    /// Close the browser, wait for the process to exit, remove its profile.
    ///
    /// Dropping the wrapper alone only aborts the handler and leaves a zombie
    /// Chrome behind. Calling this twice is a no-op the second time.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        let mut guard = self.browser.lock().await;

        if let Some(mut wrapper) = guard.take() {
            info!("Shutting down browser");

            if let Err(e) = wrapper.browser_mut().close().await {
                warn!("Failed to close browser cleanly: {}", e);
            }
            if let Err(e) = wrapper.browser_mut().wait().await {
                warn!("Failed to wait for browser exit: {}", e);
            }

            wrapper.cleanup_temp_dir();
        }

        Ok(())
    }

    pub async fn is_browser_running(&self) -> bool {
        self.browser.lock().await.is_some()
    }
}
