//! Facebook (Open Graph) sharing checks

use super::{
    DEDUCTION_CONSIDER, DEDUCTION_MAJOR, DEDUCTION_MINOR, Findings, RuleSet, Severity, tag_len,
};
use crate::metadata::{Namespace, ResolvedMetadata, meta};

/// Longest `og:title` that displays in full across platforms
pub const TITLE_MAX_LEN: usize = 55;
/// Hard limit for `og:description`
pub const DESCRIPTION_MAX_LEN: usize = 200;
/// Length above which `og:description` gets truncated in most previews
pub const DESCRIPTION_RECOMMENDED_LEN: usize = 55;

pub struct FacebookRules;

impl RuleSet for FacebookRules {
    fn id() -> &'static str {
        "facebook"
    }

    fn title() -> &'static str {
        "Facebook sharing optimization"
    }

    fn description() -> &'static str {
        "Checks if your pages have all of the essential meta tags to look good when it is shared on Facebook."
    }

    fn namespace() -> Namespace {
        Namespace::Facebook
    }

    fn check(resolved: &ResolvedMetadata, findings: &mut Findings) {
        let title = meta(resolved, "og:title");
        if title.is_empty() {
            findings.record(
                DEDUCTION_MAJOR,
                "Add an `og:title` meta tag to your page.",
                Severity::Essential,
            );
        } else if tag_len(title) > TITLE_MAX_LEN {
            findings.record(
                DEDUCTION_MINOR,
                "Reduce the length of your `og:title` to 55 characters or under for better cross-platform visibility.",
                Severity::Optimization,
            );
        }

        let description = meta(resolved, "og:description");
        if description.is_empty() {
            findings.record(
                DEDUCTION_MAJOR,
                "Add a meta description to your page.",
                Severity::Essential,
            );
        } else if tag_len(description) > DESCRIPTION_MAX_LEN {
            findings.record(
                DEDUCTION_MINOR,
                "Reduce the length of your `og:description` to 200 characters or under. A length of 55 characters or under is recommended for better cross-platform visibility.",
                Severity::Optimization,
            );
        } else if tag_len(description) > DESCRIPTION_RECOMMENDED_LEN {
            findings.record(
                DEDUCTION_CONSIDER,
                "Consider reducing the length of your `og:description` to 55 characters or under for better cross-platform visibility.",
                Severity::Optimization,
            );
        }

        if meta(resolved, "og:image").is_empty() {
            findings.record(
                DEDUCTION_MAJOR,
                "Add an `og:image` meta tag to your page. For more information, visit [Facebook's Guide to Sharing for Webmasters](https://developers.facebook.com/docs/sharing/webmasters/)",
                Severity::Essential,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{RawMetadata, resolve};

    fn evaluate(raw: RawMetadata) -> crate::rules::ScoredResult {
        FacebookRules::evaluate(&resolve(&raw))
    }

    fn complete() -> RawMetadata {
        RawMetadata::new()
            .with_facebook("og:title", "A short title")
            .with_facebook("og:description", "A short description")
            .with_facebook("og:image", "https://example.com/image.png")
    }

    #[test]
    fn complete_page_scores_full() {
        let result = evaluate(complete());
        assert_eq!(result.score, 1.0);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.id, "facebook");
        assert_eq!(result.weight, 0.5);
    }

    #[test]
    fn everything_missing_scores_zero() {
        let result = evaluate(RawMetadata::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.recommendations.len(), 3);
        assert!(
            result
                .recommendations
                .iter()
                .all(|r| r.severity == Severity::Essential)
        );
    }

    #[test]
    fn long_title_is_minor() {
        let result = evaluate(complete().with_facebook("og:title", "t".repeat(56)));
        assert_eq!(result.score, 0.75);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].severity, Severity::Optimization);
    }

    #[test]
    fn title_at_limit_passes() {
        let result = evaluate(complete().with_facebook("og:title", "t".repeat(55)));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn description_over_hard_limit_is_minor() {
        let result = evaluate(complete().with_facebook("og:description", "d".repeat(201)));
        assert_eq!(result.score, 0.75);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].message.starts_with("Reduce the length"));
    }

    #[test]
    fn medium_description_is_advisory() {
        let result = evaluate(complete().with_facebook("og:description", "d".repeat(150)));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].message.starts_with("Consider"));
        assert_eq!(result.recommendations[0].severity, Severity::Optimization);
    }

    #[test]
    fn description_at_55_has_no_recommendation() {
        let result = evaluate(complete().with_facebook("og:description", "d".repeat(55)));
        assert_eq!(result.score, 1.0);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn description_at_56_is_advisory() {
        let result = evaluate(complete().with_facebook("og:description", "d".repeat(56)));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].message.starts_with("Consider"));
        assert_eq!(result.recommendations[0].severity, Severity::Optimization);
    }

    #[test]
    fn long_title_from_basic_fallback_is_minor() {
        let raw = RawMetadata::new()
            .with_basic("title", "t".repeat(56))
            .with_facebook("og:description", "A short description")
            .with_facebook("og:image", "https://example.com/image.png");
        let result = evaluate(raw);
        assert_eq!(result.score, 0.75);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].message.contains("`og:title`"));
        assert_eq!(result.recommendations[0].severity, Severity::Optimization);
    }

    #[test]
    fn description_at_200_is_advisory_only() {
        let result = evaluate(complete().with_facebook("og:description", "d".repeat(200)));
        assert_eq!(result.score, 1.0);
        assert!(result.recommendations[0].message.starts_with("Consider"));
    }

    #[test]
    fn missing_image_alone() {
        let mut raw = complete();
        raw.facebook.remove("og:image");
        let result = evaluate(raw);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.recommendations[0].severity, Severity::Essential);
        assert!(result.recommendations[0].message.contains("og:image"));
    }

    #[test]
    fn recommendations_follow_check_order() {
        let raw = RawMetadata::new().with_facebook("og:title", "t".repeat(80));
        let result = evaluate(raw);
        let messages: Vec<&str> = result
            .recommendations
            .iter()
            .map(|r| r.message.as_str())
            .collect();
        assert!(messages[0].contains("og:title"));
        assert!(messages[1].contains("meta description"));
        assert!(messages[2].contains("og:image"));
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn table_lists_facebook_namespace() {
        let result = evaluate(complete().with_facebook("og:type", "website"));
        let keys: Vec<&str> = result.table.body().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(keys, vec!["og:description", "og:image", "og:title", "og:type"]);
    }
}
