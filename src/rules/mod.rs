//! Social sharing rule sets and their scored results
//!
//! Each rule set starts from a score of 1.0, subtracts a deduction for every
//! failed check and clamps the total at 0. Checks may also be advisory: they
//! emit a recommendation with a zero deduction.

mod facebook;
mod twitter;

pub use facebook::FacebookRules;
pub use twitter::TwitterRules;

use serde::{Deserialize, Serialize};

use crate::metadata::{DisplayTable, Namespace, ResolvedMetadata};

/// Deduction for a missing tag the platform cannot do without
pub const DEDUCTION_CRUCIAL: f64 = 1.0;
/// Deduction for a missing tag
pub const DEDUCTION_MAJOR: f64 = 0.5;
/// Deduction for a tag that is present but too long
pub const DEDUCTION_MINOR: f64 = 0.25;
/// Advisory only
pub const DEDUCTION_CONSIDER: f64 = 0.0;

/// Urgency of a recommendation
///
/// Ordered so that `Essential > Issue > Optimization`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Optimization,
    Issue,
    Essential,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Essential => "ESSENTIAL",
            Severity::Issue => "ISSUE",
            Severity::Optimization => "OPTIMIZATION",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub message: String,
    /// Structured data for the report renderer. Always empty for now.
    #[serde(default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
    pub severity: Severity,
}

impl Recommendation {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            payload: serde_json::Map::new(),
            severity,
        }
    }
}

/// Outcome of one rule set on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub weight: f64,
    pub score: f64,
    pub table: DisplayTable,
    pub recommendations: Vec<Recommendation>,
}

impl ScoredResult {
    /// Most urgent severity among the recommendations, if any
    pub fn worst_severity(&self) -> Option<Severity> {
        self.recommendations.iter().map(|r| r.severity).max()
    }
}

/// Failed checks collected while a rule set runs
///
/// Lives only for the duration of `RuleSet::evaluate`.
#[derive(Debug, Default)]
pub struct Findings {
    entries: Vec<(f64, Recommendation)>,
}

impl Findings {
    pub fn record(&mut self, deduction: f64, message: impl Into<String>, severity: Severity) {
        self.entries.push((deduction, Recommendation::new(message, severity)));
    }

    fn score(&self) -> f64 {
        let deducted: f64 = self.entries.iter().map(|(d, _)| d).sum();
        (1.0 - deducted).max(0.0)
    }

    fn into_recommendations(self) -> Vec<Recommendation> {
        self.entries.into_iter().map(|(_, r)| r).collect()
    }
}

/// A fixed set of checks over one metadata namespace
pub trait RuleSet {
    fn id() -> &'static str;

    fn title() -> &'static str;

    fn description() -> &'static str;

    fn namespace() -> Namespace;

    fn weight() -> f64 {
        0.5
    }

    /// Run every check in order, recording each failure.
    fn check(resolved: &ResolvedMetadata, findings: &mut Findings);

    fn evaluate(resolved: &ResolvedMetadata) -> ScoredResult {
        let mut findings = Findings::default();
        Self::check(resolved, &mut findings);

        let score = findings.score();
        let recommendations = findings.into_recommendations();
        tracing::debug!(
            rule_set = Self::id(),
            score,
            recommendations = recommendations.len(),
            "Rule set evaluated"
        );

        ScoredResult {
            id: Self::id().to_string(),
            title: Self::title().to_string(),
            description: Self::description().to_string(),
            weight: Self::weight(),
            score,
            table: resolved.table(Self::namespace()),
            recommendations,
        }
    }
}

/// Length as the rule thresholds count it
pub(crate) fn tag_len(value: &str) -> usize {
    value.chars().count()
}
