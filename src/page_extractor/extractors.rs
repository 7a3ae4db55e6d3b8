//! Raw social metadata extraction from a live page

use anyhow::{Context, Result};
use chromiumoxide::Page;
use tracing::debug;

use super::js_scripts::SOCIAL_METADATA_SCRIPT;
use crate::metadata::RawMetadata;

/// Evaluate the extraction script in `page` and decode its result.
///
/// # Errors
/// Returns error if the page cannot evaluate JavaScript (not loaded, crashed,
/// navigation in flight) or the script returns something other than an object.
pub async fn extract_raw_metadata(page: &Page) -> Result<RawMetadata> {
    let value = page
        .evaluate(SOCIAL_METADATA_SCRIPT)
        .await
        .context("Failed to evaluate social metadata script")?
        .into_value()
        .map_err(|e| anyhow::anyhow!("Failed to read social metadata result: {e}"))?;

    let raw = parse_payload(value)?;
    debug!(
        facebook_tags = raw.facebook.len(),
        twitter_tags = raw.twitter.len(),
        "Extracted raw social metadata"
    );
    Ok(raw)
}

/// Decode the script's return value.
///
/// Content attributes that are not strings (should never happen in a DOM, but
/// the payload crosses a process boundary) are kept as their JSON text.
pub fn parse_payload(value: serde_json::Value) -> Result<RawMetadata> {
    let mut object = match value {
        serde_json::Value::Object(object) => object,
        other => anyhow::bail!("Social metadata script returned a non-object value: {other}"),
    };

    let raw = RawMetadata {
        basic: namespace(object.remove("basic")),
        facebook: namespace(object.remove("facebook")),
        twitter: namespace(object.remove("twitter")),
    };
    Ok(raw.normalized())
}

fn namespace(value: Option<serde_json::Value>) -> std::collections::BTreeMap<String, Option<String>> {
    let Some(serde_json::Value::Object(entries)) = value else {
        return Default::default();
    };

    entries
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            };
            (key, value)
        })
        .collect()
}
