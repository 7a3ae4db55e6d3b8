//! Social metadata extraction module
//!
//! Reads title, meta description, Open Graph and Twitter Card tags from a
//! rendered page with a single JavaScript evaluation.

pub mod extractors;
pub mod js_scripts;

pub use extractors::{extract_raw_metadata, parse_payload};
pub use js_scripts::SOCIAL_METADATA_SCRIPT;
