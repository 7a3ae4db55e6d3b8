//! Raw and resolved social metadata
//!
//! `RawMetadata` is what the page gives us, verbatim. `ResolvedMetadata` is what
//! the rule sets read: every tag they reference has a value, possibly empty.

mod resolver;

pub use resolver::{FALLBACK_CHAIN, FallbackSource, FallbackStep, resolve};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header row prepended to every display table
pub const TABLE_HEADER: [&str; 2] = ["Meta tag", "Value found on your page"];

/// Tag namespaces the rule sets read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Facebook,
    Twitter,
}

impl Namespace {
    /// Namespace a tag key belongs to. Anything without the `og:` prefix is Twitter's.
    pub fn of_key(key: &str) -> Self {
        if key.starts_with("og:") {
            Namespace::Facebook
        } else {
            Namespace::Twitter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Facebook => "facebook",
            Namespace::Twitter => "twitter",
        }
    }
}

/// Tag values exactly as captured from the page
///
/// Keys are lowercased on capture. A `None` value means the tag was present
/// without a `content` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub basic: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub facebook: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub twitter: BTreeMap<String, Option<String>>,
}

impl RawMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basic(mut self, key: &str, value: impl Into<String>) -> Self {
        self.basic.insert(key.to_lowercase(), Some(value.into()));
        self
    }

    pub fn with_facebook(mut self, key: &str, value: impl Into<String>) -> Self {
        self.facebook.insert(key.to_lowercase(), Some(value.into()));
        self
    }

    pub fn with_twitter(mut self, key: &str, value: impl Into<String>) -> Self {
        self.twitter.insert(key.to_lowercase(), Some(value.into()));
        self
    }

    /// Lowercase every key, keeping the last value when two keys collide.
    ///
    /// The browser script already does this; payloads from other sources may not.
    pub fn normalized(self) -> Self {
        fn lower(map: BTreeMap<String, Option<String>>) -> BTreeMap<String, Option<String>> {
            map.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
        }

        Self {
            basic: lower(self.basic),
            facebook: lower(self.facebook),
            twitter: lower(self.twitter),
        }
    }
}

/// Effective tag values after fallback resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMetadata {
    pub facebook: BTreeMap<String, String>,
    pub twitter: BTreeMap<String, String>,
}

impl ResolvedMetadata {
    pub fn namespace(&self, namespace: Namespace) -> &BTreeMap<String, String> {
        match namespace {
            Namespace::Facebook => &self.facebook,
            Namespace::Twitter => &self.twitter,
        }
    }

    /// Presentation rows for one namespace: header first, then key/value pairs by key.
    pub fn table(&self, namespace: Namespace) -> DisplayTable {
        let mut rows = Vec::with_capacity(self.namespace(namespace).len() + 1);
        rows.push([TABLE_HEADER[0].to_string(), TABLE_HEADER[1].to_string()]);
        // BTreeMap iteration is already ordered by key
        rows.extend(
            self.namespace(namespace)
                .iter()
                .map(|(key, value)| [key.clone(), value.clone()]),
        );
        DisplayTable { rows }
    }
}

/// Look up the effective value of a tag.
///
/// `og:` keys read the Facebook namespace, everything else the Twitter one.
/// Unknown keys yield `""`.
pub fn meta<'a>(resolved: &'a ResolvedMetadata, key: &str) -> &'a str {
    resolved
        .namespace(Namespace::of_key(key))
        .get(key)
        .map(String::as_str)
        .unwrap_or("")
}

/// Two-column table of tags found on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayTable {
    rows: Vec<[String; 2]>,
}

impl DisplayTable {
    pub fn rows(&self) -> &[[String; 2]] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String; 2]> {
        self.rows.first()
    }

    /// Rows after the header
    pub fn body(&self) -> &[[String; 2]] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved_with(facebook: &[(&str, &str)], twitter: &[(&str, &str)]) -> ResolvedMetadata {
        ResolvedMetadata {
            facebook: facebook
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            twitter: twitter
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn meta_routes_by_prefix() {
        let resolved = resolved_with(&[("og:title", "Hello")], &[("twitter:title", "Tweet")]);
        assert_eq!(meta(&resolved, "og:title"), "Hello");
        assert_eq!(meta(&resolved, "twitter:title"), "Tweet");
    }

    #[test]
    fn meta_unknown_key_is_empty() {
        let resolved = ResolvedMetadata::default();
        assert_eq!(meta(&resolved, "og:locale"), "");
        assert_eq!(meta(&resolved, "twitter:site"), "");
        assert_eq!(meta(&resolved, "description"), "");
    }

    #[test]
    fn non_og_keys_never_read_facebook() {
        let resolved = resolved_with(&[("description", "from facebook map")], &[]);
        assert_eq!(meta(&resolved, "description"), "");
    }

    #[test]
    fn table_is_sorted_with_header_first() {
        let resolved = resolved_with(
            &[
                ("og:url", "https://example.com"),
                ("og:description", "d"),
                ("og:image", "i"),
                ("og:title", "t"),
            ],
            &[],
        );

        let table = resolved.table(Namespace::Facebook);
        assert_eq!(
            table.header(),
            Some(&["Meta tag".to_string(), "Value found on your page".to_string()])
        );

        let keys: Vec<&str> = table.body().iter().map(|row| row[0].as_str()).collect();
        assert_eq!(keys, vec!["og:description", "og:image", "og:title", "og:url"]);
    }

    #[test]
    fn table_of_empty_namespace_is_header_only() {
        let table = ResolvedMetadata::default().table(Namespace::Twitter);
        assert_eq!(table.rows().len(), 1);
        assert!(table.body().is_empty());
    }

    #[test]
    fn builders_lowercase_keys() {
        let raw = RawMetadata::new()
            .with_facebook("OG:Title", "x")
            .with_twitter("Twitter:Card", "summary");
        assert!(raw.facebook.contains_key("og:title"));
        assert!(raw.twitter.contains_key("twitter:card"));
    }

    #[test]
    fn normalized_lowercases_deserialized_keys() {
        let raw: RawMetadata = serde_json::from_str(
            r#"{"basic": {}, "facebook": {"OG:IMAGE": "a.png"}, "twitter": {"Twitter:Card": null}}"#,
        )
        .expect("valid payload");
        let raw = raw.normalized();
        assert_eq!(raw.facebook.get("og:image"), Some(&Some("a.png".to_string())));
        assert_eq!(raw.twitter.get("twitter:card"), Some(&None));
    }
}
