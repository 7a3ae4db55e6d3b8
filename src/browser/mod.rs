//! Browser infrastructure for launching and managing Chrome instances

mod wrapper;

pub use wrapper::{BrowserWrapper, create_blank_page, launch_browser};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Navigation timeout after {timeout_ms}ms for URL: {url}")]
    Timeout { url: String, timeout_ms: u128 },

    #[error("Element not found (timeout after {timeout_ms}ms): '{selector}'")]
    ElementNotFound { selector: String, timeout_ms: u128 },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

pub type BrowserResult<T> = Result<T, BrowserError>;
