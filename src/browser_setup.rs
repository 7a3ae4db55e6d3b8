//! Locating, downloading and launching Chrome/Chromium

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, trace, warn};

use crate::BrowserConfig;
use crate::utils::constants::{CHROME_USER_AGENT, CHROMIUM_PATH_ENV, MANAGED_BROWSER_CACHE_DIR};

/// Removes the profile directory on drop unless `into_path()` was called,
/// so every early return in `launch_browser` cleans up after itself.
struct TempDirGuard {
    path: PathBuf,
    keep: bool,
}

impl TempDirGuard {
    fn new(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path).context("Failed to create user data directory")?;
        Ok(Self { path, keep: false })
    }

    fn into_path(mut self) -> PathBuf {
        self.keep = true;
        self.path.clone()
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => info!(
                "Cleaned up temp dir after launch failure: {}",
                self.path.display()
            ),
            Err(e) => warn!("Failed to clean up temp dir {}: {}", self.path.display(), e),
        }
    }
}

fn candidate_paths() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "~/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    }
}

fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

/// Find a Chrome/Chromium executable.
///
/// Order: `CHROMIUM_PATH`, well-known install locations, then `which` on Unix.
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from {}: {}", CHROMIUM_PATH_ENV, path.display());
            return Ok(path);
        }
        warn!(
            "{} points to non-existent file: {}",
            CHROMIUM_PATH_ENV,
            path.display()
        );
    }

    for candidate in candidate_paths() {
        if let Some(path) = expand_home(candidate)
            && path.exists()
        {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
            if let Ok(output) = Command::new("which").arg(cmd).output()
                && output.status.success()
            {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    info!("Found browser using 'which' command: {}", found);
                    return Ok(PathBuf::from(found));
                }
            }
        }
    }

    warn!("No Chrome/Chromium executable found. Will download and use fetcher.");
    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Download Chromium into the user cache directory and return its executable.
pub async fn download_managed_browser() -> Result<PathBuf> {
    info!("Downloading managed Chromium browser...");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir().join(".cache");
            warn!(
                "Could not determine system cache directory, using {}",
                fallback.display()
            );
            fallback
        })
        .join(MANAGED_BROWSER_CACHE_DIR);

    std::fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("Failed to build fetcher options")?,
    );

    let revision_info = fetcher.fetch().await.context("Failed to fetch browser")?;
    info!(
        "Downloaded Chromium to: {}",
        revision_info.folder_path.display()
    );

    Ok(revision_info.executable_path)
}

/// Launch Chrome configured for metadata audits.
///
/// `chrome_data_dir` isolates the profile so several processes can audit at
/// the same time; without it the process id picks the directory.
pub async fn launch_browser(
    config: &BrowserConfig,
    chrome_data_dir: Option<PathBuf>,
) -> Result<(Browser, JoinHandle<()>)> {
    let chrome_path = match find_browser_executable().await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    let user_data_dir_path = chrome_data_dir.unwrap_or_else(|| {
        std::env::temp_dir().join(format!("social_meta_audit_chrome_{}", std::process::id()))
    });
    let temp_guard = TempDirGuard::new(user_data_dir_path)?;

    let mut config_builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(config.window.width, config.window.height)
        .user_data_dir(temp_guard.path.clone())
        .chrome_executable(chrome_path);

    if config.headless {
        config_builder = config_builder.headless_mode(HeadlessMode::default());
    } else {
        config_builder = config_builder.with_head();
    }

    // Some sites serve different meta tags to headless user agents
    config_builder = config_builder
        .arg(format!("--user-agent={}", CHROME_USER_AGENT))
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--disable-extensions")
        .arg("--disable-background-networking")
        .arg("--disable-breakpad")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--mute-audio");

    if config.disable_security {
        warn!("Disabling browser security features (disable_security=true)");
        config_builder = config_builder
            .arg("--disable-web-security")
            .arg("--ignore-certificate-errors");
    }

    if config.disable_security || should_disable_sandbox() {
        info!("Disabling Chrome sandbox");
        config_builder = config_builder
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox");
    }

    let browser_config = config_builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!("Launching browser with config: {:?}", browser_config);
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let message = e.to_string();
                if is_benign_handler_error(&message) {
                    trace!("Suppressed benign CDP serialization error: {}", message);
                } else {
                    error!("Browser handler error: {:?}", e);
                }
            }
        }
        info!("Browser handler task completed");
    });

    temp_guard.into_path();

    Ok((browser, handler_task))
}

/// CDP events chromiumoxide has no type for surface as deserialization errors.
/// See mattsse/chromiumoxide#167 and #229.
fn is_benign_handler_error(message: &str) -> bool {
    message.contains("data did not match any variant of untagged enum Message")
        || message.contains("Failed to deserialize WS response")
}

/// setuid sandboxes do not work inside containers
fn should_disable_sandbox() -> bool {
    Path::new("/.dockerenv").exists()
        || std::env::var("container").is_ok()
        || std::env::var("KUBERNETES_SERVICE_HOST").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_handler_errors() {
        assert!(is_benign_handler_error(
            "data did not match any variant of untagged enum Message"
        ));
        assert!(is_benign_handler_error("Failed to deserialize WS response: eof"));
        assert!(!is_benign_handler_error("connection reset"));
    }

    #[test]
    fn absolute_candidates_are_untouched() {
        assert_eq!(
            expand_home("/usr/bin/chromium"),
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[test]
    fn home_candidates_expand() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home("~/Applications/Chromium.app"),
                Some(home.join("Applications/Chromium.app"))
            );
        }
    }
}
