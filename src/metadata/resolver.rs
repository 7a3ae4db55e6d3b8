//! Fallback resolution from raw tags to effective tags
//!
//! The chain is sequential: later steps read values produced by earlier ones
//! (`twitter:image` reads the resolved `og:image`, and so on). Reordering
//! `FALLBACK_CHAIN` changes results.

use std::collections::BTreeMap;

use super::{Namespace, RawMetadata, ResolvedMetadata};

/// Where a tag takes its value from when the page left it absent or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSource {
    /// No fallback, the tag resolves to `""`
    Empty,
    /// A key of the raw `basic` namespace (`title`, `description`)
    Basic(&'static str),
    /// A tag already resolved by an earlier step
    Resolved(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackStep {
    pub tag: &'static str,
    pub source: FallbackSource,
}

const fn step(tag: &'static str, source: FallbackSource) -> FallbackStep {
    FallbackStep { tag, source }
}

/// Fallback steps in the order they are applied
pub const FALLBACK_CHAIN: [FallbackStep; 7] = [
    step("og:title", FallbackSource::Basic("title")),
    step("og:description", FallbackSource::Basic("description")),
    step("og:image", FallbackSource::Empty),
    step("twitter:card", FallbackSource::Empty),
    step("twitter:image", FallbackSource::Resolved("og:image")),
    step("twitter:title", FallbackSource::Resolved("og:title")),
    step("twitter:description", FallbackSource::Resolved("og:description")),
];

/// Resolve raw page tags into the effective values the rule sets read.
///
/// Raw tags outside the chain are carried over untouched (a missing
/// `content` becomes `""`) so they still show up in the display tables.
pub fn resolve(raw: &RawMetadata) -> ResolvedMetadata {
    let mut resolved = ResolvedMetadata {
        facebook: flatten(&raw.facebook),
        twitter: flatten(&raw.twitter),
    };

    for step in FALLBACK_CHAIN {
        let current = super::meta(&resolved, step.tag);
        if !current.is_empty() {
            continue;
        }

        let fallback = match step.source {
            FallbackSource::Empty => String::new(),
            FallbackSource::Basic(key) => raw
                .basic
                .get(key)
                .cloned()
                .flatten()
                .unwrap_or_default(),
            FallbackSource::Resolved(key) => super::meta(&resolved, key).to_string(),
        };

        let namespace = match Namespace::of_key(step.tag) {
            Namespace::Facebook => &mut resolved.facebook,
            Namespace::Twitter => &mut resolved.twitter,
        };
        namespace.insert(step.tag.to_string(), fallback);
    }

    resolved
}

fn flatten(map: &BTreeMap<String, Option<String>>) -> BTreeMap<String, String> {
    map.iter()
        .map(|(key, value)| (key.clone(), value.clone().unwrap_or_default()))
        .collect()
}
