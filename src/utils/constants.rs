//! Shared configuration constants

/// Chrome user agent string sent by the audit browser
///
/// Keep within a few releases of current stable, some sites gate meta tags
/// on browser version.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Environment variable overriding browser discovery
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// Subdirectory of the user cache dir holding the downloaded Chromium
pub const MANAGED_BROWSER_CACHE_DIR: &str = "social_meta_audit/chromium";

/// Navigation timeout used when neither config nor caller sets one
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;
