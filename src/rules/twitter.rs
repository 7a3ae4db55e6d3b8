//! Twitter Card sharing checks

use super::{
    DEDUCTION_CRUCIAL, DEDUCTION_MAJOR, DEDUCTION_MINOR, Findings, RuleSet, Severity, tag_len,
};
use crate::metadata::{Namespace, ResolvedMetadata, meta};

/// Card types Twitter renders
pub const VALID_CARD_TYPES: [&str; 4] = ["summary", "summary_large_image", "app", "player"];
pub const TITLE_MAX_LEN: usize = 70;
pub const DESCRIPTION_MAX_LEN: usize = 200;

pub struct TwitterRules;

impl RuleSet for TwitterRules {
    fn id() -> &'static str {
        "twitter"
    }

    fn title() -> &'static str {
        "Twitter sharing optimization"
    }

    fn description() -> &'static str {
        "Checks if your pages have all of the essential meta tags to look good when it is shared on Twitter."
    }

    fn namespace() -> Namespace {
        Namespace::Twitter
    }

    fn check(resolved: &ResolvedMetadata, findings: &mut Findings) {
        let card = meta(resolved, "twitter:card");
        if !VALID_CARD_TYPES.contains(&card) {
            findings.record(
                DEDUCTION_CRUCIAL,
                "Add a valid `twitter:card` meta tag to your page. For more information, visit [Twitter's Getting Started with Cards Guide](https://developer.twitter.com/en/docs/tweets/optimize-with-cards/guides/getting-started)",
                Severity::Essential,
            );
        }

        let title = meta(resolved, "twitter:title");
        if title.is_empty() {
            findings.record(
                DEDUCTION_MAJOR,
                "Add a `twitter:title` meta tag to your page.",
                Severity::Optimization,
            );
        } else if tag_len(title) > TITLE_MAX_LEN {
            findings.record(
                DEDUCTION_MINOR,
                "Reduce the length of your `twitter:title` to 70 characters or under.",
                Severity::Optimization,
            );
        }

        let description = meta(resolved, "twitter:description");
        if description.is_empty() {
            findings.record(
                DEDUCTION_MAJOR,
                "Add a meta description to your page.",
                Severity::Optimization,
            );
        } else if tag_len(description) > DESCRIPTION_MAX_LEN {
            findings.record(
                DEDUCTION_MINOR,
                "Reduce the length of your `twitter:description` to 200 characters or under.",
                Severity::Optimization,
            );
        }

        if meta(resolved, "twitter:image").is_empty() {
            findings.record(
                DEDUCTION_MAJOR,
                "Add a `twitter:image` meta tag to your page. For more information, visit [Facebook's Guide to Sharing for Webmasters](https://developers.facebook.com/docs/sharing/webmasters/)",
                Severity::Optimization,
            );
        }

        // Only reachable with a valid card, so it never stacks with the card deduction
        if card == "player" && !is_secure_player_url(meta(resolved, "twitter:player")) {
            findings.record(
                DEDUCTION_CRUCIAL,
                "Add a valid `twitter:player` meta tag to your page. It is mandatory when using the player card. For more information, visit [Twitter's Player Card Documentation](https://developer.twitter.com/en/docs/tweets/optimize-with-cards/overview/player-card)",
                Severity::Issue,
            );
        }
    }
}

/// Player URLs must be `https://` or protocol-relative.
pub fn is_secure_player_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("//")
}
