//! Social sharing metadata auditor
//!
//! Extracts Open Graph and Twitter Card tags from a rendered page, resolves
//! fallbacks between them and scores the page against the Facebook and
//! Twitter rule sets.

pub mod audit;
mod browser;
pub mod browser_setup;
mod manager;
pub mod metadata;
pub mod navigate;
pub mod page_extractor;
pub mod rules;
mod utils;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up by `BrowserManager::global()` and the CLI
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Selector to wait for before extracting, for client-rendered heads
    #[serde(default)]
    pub wait_for_selector: Option<String>,

    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Browser launch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Disable web security features (Same-Origin Policy, certificate checks)
    /// WARNING: Only enable for trusted content
    #[serde(default = "default_disable_security")]
    pub disable_security: bool,

    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,
}

fn default_navigation_timeout_ms() -> u64 {
    utils::constants::DEFAULT_NAVIGATION_TIMEOUT_MS
}

fn default_headless() -> bool {
    true
}

fn default_disable_security() -> bool {
    false
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

impl Default for Config {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: default_navigation_timeout_ms(),
            wait_for_selector: None,
            browser: BrowserConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            disable_security: default_disable_security(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Config {
    pub fn navigate_options(&self) -> navigate::NavigateOptions {
        navigate::NavigateOptions {
            timeout_ms: Some(self.navigation_timeout_ms),
            wait_for_selector: self.wait_for_selector.clone(),
        }
    }
}

/// Load config from a YAML file, falling back to defaults when it does not exist
pub fn load_yaml_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();

    if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

pub use audit::{AuditReport, MetadataSource, PageAudit, audit, audit_url, evaluate};
pub use browser::{BrowserError, BrowserResult, BrowserWrapper};
pub use manager::BrowserManager;
pub use metadata::{DisplayTable, Namespace, RawMetadata, ResolvedMetadata, meta, resolve};
pub use navigate::NavigateOptions;
pub use rules::{Recommendation, ScoredResult, Severity};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_yaml_config("/nonexistent/social_meta_audit.yaml").expect("defaults");
        assert_eq!(config, Config::default());
        assert_eq!(config.navigation_timeout_ms, 30_000);
        assert!(config.browser.headless);
        assert!(!config.browser.disable_security);
        assert_eq!(config.browser.window.width, 1280);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "navigation_timeout_ms: 45000\nbrowser:\n  headless: false").expect("write");

        let config = load_yaml_config(file.path()).expect("valid yaml");
        assert_eq!(config.navigation_timeout_ms, 45_000);
        assert!(!config.browser.headless);
        assert_eq!(config.browser.window, WindowConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "navigation_timeout_ms: [not, a, number]").expect("write");
        assert!(load_yaml_config(file.path()).is_err());
    }

    #[test]
    fn navigate_options_follow_config() {
        let config = Config {
            wait_for_selector: Some("head meta[property='og:title']".to_string()),
            ..Config::default()
        };
        let options = config.navigate_options();
        assert_eq!(options.timeout_ms, Some(30_000));
        assert_eq!(options.wait_for_selector.as_deref(), Some("head meta[property='og:title']"));
    }
}
